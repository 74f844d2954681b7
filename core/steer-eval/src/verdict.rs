//! Evaluation outcomes.

use serde::{Serialize, Serializer};
use std::fmt;

/// Outcome of evaluating one candidate.
///
/// `Display` renders the exact plain-text message returned to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    TooShort { min: i64, len: usize },
    TooLong { max: i64, len: usize },
    /// Holds the needle with the casing the user submitted.
    MissingSubstring { needle: String },
}

impl Verdict {
    /// Text of a passing verdict.
    pub const VALID: &'static str = "valid";

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Valid => f.write_str(Self::VALID),
            Verdict::TooShort { min, len } => write!(
                f,
                "Does not meet min length of {min} characters. Current length: {len}"
            ),
            Verdict::TooLong { max, len } => write!(
                f,
                "Exceeds max length of {max} characters. Current length: {len}"
            ),
            Verdict::MissingSubstring { needle } => write!(f, "Does not contain {needle}"),
        }
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
