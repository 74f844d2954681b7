//! The per-user condition record.

use serde::{Deserialize, Serialize};

use crate::{Result, UserId};

/// The rule set one user has submitted.
///
/// Every predicate is optional. An absent field is never evaluated, so a
/// record with no predicates accepts every candidate.
///
/// Records are replaced whole on every write; there is no field-level update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionRecord {
    /// Substring the candidate must contain, compared case-insensitively.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,

    /// Minimum candidate length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,

    /// Maximum candidate length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,

    /// Owner of the record. Always equal to the key it is stored under.
    #[serde(alias = "user_id")]
    pub user_id: UserId,
}

impl ConditionRecord {
    /// Creates a record with no predicates.
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self {
            contains: None,
            min: None,
            max: None,
            user_id,
        }
    }

    #[must_use]
    pub fn with_contains(mut self, needle: impl Into<String>) -> Self {
        self.contains = Some(needle.into());
        self
    }

    #[must_use]
    pub fn with_min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    /// Returns true when no predicate is set.
    #[must_use]
    pub fn is_permissive(&self) -> bool {
        self.contains.is_none() && self.min.is_none() && self.max.is_none()
    }

    /// Encodes the record as the JSON text persisted by stores.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a record from its persisted JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
