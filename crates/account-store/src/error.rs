//! Account store errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Account already linked for {0}")]
    AlreadyExists(String),

    #[error("No account linked for {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported store version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },
}
