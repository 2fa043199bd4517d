//! Storage-specific errors

use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read or parse the persisted document
    #[error("Failed to load library document: {0}")]
    Load(String),

    /// Failed to durably write the document
    #[error("Failed to persist library document: {0}")]
    Persist(String),

    /// Serialization/deserialization error
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for mixtape_core::MixtapeError {
    fn from(err: StorageError) -> Self {
        mixtape_core::MixtapeError::storage(err.to_string())
    }
}
