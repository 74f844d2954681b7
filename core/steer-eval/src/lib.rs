//! Condition evaluation for steer.
//!
//! Scores a candidate string against a [`ConditionRecord`]. The evaluator is a
//! pure function: it never touches storage and never fails on a well-formed
//! record.
//!
//! Predicates run in a fixed order and stop at the first failure:
//!
//! 1. minimum length
//! 2. maximum length
//! 3. case-insensitive substring containment
//!
//! Lengths are counted in Unicode scalar values, not bytes.

mod verdict;

pub use verdict::Verdict;

use steer_types::ConditionRecord;

/// Evaluates `candidate` against `record`.
#[must_use]
pub fn evaluate(candidate: &str, record: &ConditionRecord) -> Verdict {
    let len = candidate.chars().count();

    if let Some(min) = record.min {
        if (len as i128) < i128::from(min) {
            return Verdict::TooShort { min, len };
        }
    }

    if let Some(max) = record.max {
        if (len as i128) > i128::from(max) {
            return Verdict::TooLong { max, len };
        }
    }

    if let Some(needle) = &record.contains {
        if !candidate.to_lowercase().contains(&needle.to_lowercase()) {
            return Verdict::MissingSubstring {
                needle: needle.clone(),
            };
        }
    }

    Verdict::Valid
}
