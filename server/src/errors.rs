use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("profile store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("chat backend error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no pet profile has been saved yet")]
    ProfileMissing,

    #[error("validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
