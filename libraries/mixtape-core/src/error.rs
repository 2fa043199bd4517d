//! Core error types for Mixtape

use thiserror::Error;

/// Result type alias using `MixtapeError`
pub type Result<T> = std::result::Result<T, MixtapeError>;

/// Core error type for Mixtape
#[derive(Error, Debug)]
pub enum MixtapeError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity that was looked up (user, playlist, item)
        entity: String,
        /// Identifier that failed to resolve
        id: String,
    },

    /// Malformed input (blank name, missing id/kind, out-of-range rating)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Duplicate entity (media reference already saved, username taken)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad credentials or token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// External provider failure (search, upload target)
    #[error("Upstream provider error: {0}")]
    Upstream(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl MixtapeError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an upstream provider error
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }
}
