//! Diagnosis error types.

use thiserror::Error;

/// Result type for diagnosis operations.
pub type DiagnoseResult<T> = Result<T, DiagnoseError>;

/// Errors raised by a diagnostic reporter. These are only ever logged.
#[derive(Debug, Error)]
pub enum DiagnoseError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("diagnosis API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("diagnosis API returned no text")]
    EmptyResponse,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}
