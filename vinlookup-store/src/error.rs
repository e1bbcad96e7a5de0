//! Store error types.

use thiserror::Error;

/// Errors that can occur while loading or saving stored data.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file exists but does not hold the expected JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Returns true if the error came from malformed file contents.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Serialization(_))
    }
}
