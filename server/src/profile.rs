use crate::errors::{Error, Result};
use crate::model::PetProfile;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// JSON-file-backed store for the single pet profile.
///
/// Reads go straight to disk; writes are serialized behind a lock so a
/// rename cannot interleave with a full save.
#[derive(Clone)]
pub struct ProfileStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// An absent file reads as "no profile yet".
    pub async fn load(&self) -> Result<Option<PetProfile>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Full replacement of the stored profile.
    pub async fn save(&self, profile: &PetProfile) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.persist(profile).await
    }

    /// Renames the stored pet. A rename cannot create a profile.
    pub async fn update_name(&self, name: &str) -> Result<PetProfile> {
        let _guard = self.write_lock.lock().await;
        let mut profile = self.load().await?.ok_or(Error::ProfileMissing)?;
        profile.name = name.to_string();
        self.persist(&profile).await?;
        Ok(profile)
    }

    /// Whether a profile has been saved. An unreadable store counts as "no
    /// profile", matching how the app treats it.
    pub async fn exists(&self) -> bool {
        match self.load().await {
            Ok(profile) => profile.is_some(),
            Err(e) => {
                warn!("profile store unreadable: {}", e);
                false
            }
        }
    }

    async fn persist(&self, profile: &PetProfile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(profile)?;
        tokio::fs::write(&self.path, bytes).await?;
        info!(name = %profile.name, "pet profile saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PetGender;
    use chrono::{TimeZone, Utc};

    fn temp_store() -> ProfileStore {
        let path = std::env::temp_dir().join(format!("petcare-profile-{}.json", uuid::Uuid::new_v4()));
        ProfileStore::new(path)
    }

    fn profile(name: &str) -> PetProfile {
        PetProfile {
            id: "default_pet".to_string(),
            name: name.to_string(),
            breed: "Border Collie".to_string(),
            age: 3,
            gender: PetGender::Female,
            weight_kg: 17.5,
            date_of_birth: Utc.with_ymd_and_hms(2021, 4, 12, 0, 0, 0).unwrap(),
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn test_empty_store_has_no_profile() {
        let store = temp_store();
        assert_eq!(store.load().await.unwrap(), None);
        assert!(!store.exists().await);
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let store = temp_store();
        let saved = profile("Luna");
        store.save(&saved).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(saved));
        assert!(store.exists().await);
    }

    #[tokio::test]
    async fn test_save_replaces_the_whole_profile() {
        let store = temp_store();
        store.save(&profile("Luna")).await.unwrap();
        let mut replacement = profile("Max");
        replacement.breed = "Beagle".to_string();
        store.save(&replacement).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(replacement));
    }

    #[tokio::test]
    async fn test_rename_changes_only_the_name() {
        let store = temp_store();
        store.save(&profile("Luna")).await.unwrap();
        let renamed = store.update_name("Nova").await.unwrap();
        assert_eq!(renamed.name, "Nova");
        assert_eq!(renamed.breed, "Border Collie");
        assert_eq!(store.load().await.unwrap().unwrap().name, "Nova");
    }

    #[tokio::test]
    async fn test_rename_without_profile_fails() {
        let store = temp_store();
        assert!(matches!(
            store.update_name("Nova").await,
            Err(Error::ProfileMissing)
        ));
    }
}
