//! Core type definitions for steer.
//!
//! This crate defines the types shared by every other crate in the workspace:
//! - User identifiers (UUID v4 on issuance, opaque afterwards)
//! - The per-user condition record that the evaluator scores candidates against
//!
//! Storage, evaluation and HTTP concerns live in their own crates.

mod ids;
mod record;

pub use ids::UserId;
pub use record::ConditionRecord;

/// Errors that can name the variant that occurred.
///
/// Used when a failure is described outside the process, where the Rust type
/// alone says little about what went wrong.
pub trait ErrorVariant: std::fmt::Display {
    /// Qualified variant name, e.g. `StoreError::NotFound`.
    fn variant(&self) -> &'static str;
}

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("user id must not be empty")]
    EmptyUserId,
}

impl ErrorVariant for Error {
    fn variant(&self) -> &'static str {
        match self {
            Error::Serialization(_) => "steer_types::Error::Serialization",
            Error::EmptyUserId => "steer_types::Error::EmptyUserId",
        }
    }
}
