//! Prompt text sent to the diagnosis model.

use crate::Failure;

/// System messages sent ahead of every failure report.
pub const SYSTEM_PROMPTS: [&str; 2] = [
    "Think this through step by step.",
    "Respond in a terse manner.",
];

/// Builds the user message describing `failure`.
pub fn user_prompt(failure: &Failure) -> String {
    let mut prompt = format!(
        "This error message occurred because of '{}' at line {} in file {}, operation {}. \
         The error type is {}.",
        failure.error, failure.line, failure.file, failure.operation, failure.error_type,
    );
    if let Some(source) = failure.source {
        prompt.push_str(" The source is: \n\n```rust\n");
        prompt.push_str(source.trim_end());
        prompt.push_str("\n```\n\n");
    } else {
        prompt.push(' ');
    }
    prompt.push_str(
        "Provide a detailed explanation on why this error occurred \
         and sample Rust code on how to rectify the problem.",
    );
    prompt
}
