//! Error types for the condition store.

use steer_types::ErrorVariant;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record is stored under the key.
    #[error("no conditions stored for user {0}")]
    NotFound(String),

    /// The record could not be encoded for storage.
    #[error("failed to encode conditions: {0}")]
    Serialization(#[source] steer_types::Error),

    /// The stored value could not be decoded back into a record.
    #[error("stored conditions for {key} are unreadable: {reason}")]
    Deserialization { key: String, reason: String },

    /// The record's owner does not match the key it is written under.
    #[error("record belongs to {record_user} but was written under {key}")]
    KeyMismatch { key: String, record_user: String },

    /// The backing engine could not be reached or rejected the operation.
    #[error("condition store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Returns true if the caller may retry the same operation later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

impl ErrorVariant for StoreError {
    fn variant(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "StoreError::NotFound",
            StoreError::Serialization(_) => "StoreError::Serialization",
            StoreError::Deserialization { .. } => "StoreError::Deserialization",
            StoreError::KeyMismatch { .. } => "StoreError::KeyMismatch",
            StoreError::Unavailable(_) => "StoreError::Unavailable",
        }
    }
}
