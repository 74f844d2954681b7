//! Failure diagnosis hook for steer.
//!
//! Fallible operations can be run inside [`observe`]. When one fails, the
//! error and the operation's source context are handed to a
//! [`DiagnosticReporter`], typically a language model, and the explanation it
//! returns is logged. The original error is then returned unchanged.
//!
//! Diagnosis is a side channel only. It never alters a successful result,
//! never replaces the error, and a reporter that itself fails is logged and
//! ignored.

mod boundary;
mod error;
mod openai;
mod prompt;

pub use boundary::{observe, Failure, Scope};
pub use error::{DiagnoseError, DiagnoseResult};
pub use openai::{OpenAiConfig, OpenAiReporter};
pub use prompt::{user_prompt, SYSTEM_PROMPTS};

use async_trait::async_trait;

/// Explains failures to a human.
#[async_trait]
pub trait DiagnosticReporter: Send + Sync {
    /// Produces an explanation of `failure`, or `None` if the reporter has
    /// nothing to say.
    async fn diagnose(&self, failure: &Failure) -> DiagnoseResult<Option<String>>;

    /// Short reporter name for logs.
    fn name(&self) -> &'static str;
}

/// Reporter that never produces a diagnosis.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

#[async_trait]
impl DiagnosticReporter for NoopReporter {
    async fn diagnose(&self, _failure: &Failure) -> DiagnoseResult<Option<String>> {
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}
