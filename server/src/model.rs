use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use simulator::PetActivityEvent;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetGender {
    Male,
    Female,
    Unknown,
}

impl fmt::Display for PetGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            PetGender::Male => "male",
            PetGender::Female => "female",
            PetGender::Unknown => "unknown",
        };
        f.write_str(word)
    }
}

/// The single stored pet profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetProfile {
    #[serde(default = "default_pet_id")]
    pub id: String,
    pub name: String,
    pub breed: String,
    /// Age in years.
    pub age: u32,
    pub gender: PetGender,
    pub weight_kg: f64,
    pub date_of_birth: DateTime<Utc>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

fn default_pet_id() -> String {
    "default_pet".to_string()
}

/// One leaderboard row.
#[derive(Debug, Clone, Serialize)]
pub struct RankedPet {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
    /// Activity points.
    pub score: u32,
    pub rank: usize,
}

/// REST API response wrapper for the activity timeline.
#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub data: Vec<PetActivityEvent>,
    pub total: usize,
    pub limit: usize,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub name: String,
}
