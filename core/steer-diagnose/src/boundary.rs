//! The error-observing boundary.

use std::future::Future;
use std::panic::Location;
use steer_types::ErrorVariant;
use tracing::{debug, error, info, warn};

use crate::DiagnosticReporter;

/// Where an observed operation lives.
#[derive(Debug, Clone, Copy)]
pub struct Scope {
    pub operation: &'static str,
    pub location: &'static Location<'static>,
    pub source: Option<&'static str>,
}

impl Scope {
    /// Names the operation and records the caller's file and line.
    #[track_caller]
    #[must_use]
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            location: Location::caller(),
            source: None,
        }
    }

    /// Attaches source text shown to the reporter.
    #[must_use]
    pub fn with_source(mut self, source: &'static str) -> Self {
        self.source = Some(source);
        self
    }
}

/// Everything a reporter is told about one failure.
#[derive(Debug, Clone)]
pub struct Failure {
    pub operation: &'static str,
    pub error: String,
    pub error_type: &'static str,
    pub file: &'static str,
    pub line: u32,
    pub source: Option<&'static str>,
}

impl Failure {
    fn new<E: ErrorVariant>(scope: &Scope, err: &E) -> Self {
        Self {
            operation: scope.operation,
            error: err.to_string(),
            error_type: err.variant(),
            file: scope.location.file(),
            line: scope.location.line(),
            source: scope.source,
        }
    }
}

/// Runs `op`; on failure, reports it and returns the original error.
///
/// The reporter is awaited before the error is returned, so its explanation
/// is logged alongside the failure it belongs to.
pub async fn observe<T, E, Fut>(
    reporter: &dyn DiagnosticReporter,
    scope: Scope,
    op: Fut,
) -> Result<T, E>
where
    Fut: Future<Output = Result<T, E>>,
    E: ErrorVariant,
{
    let err = match op.await {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    error!(
        operation = scope.operation,
        location = %scope.location,
        error = %err,
        variant = err.variant(),
        "operation failed"
    );

    let failure = Failure::new(&scope, &err);
    debug!(reporter = reporter.name(), "requesting diagnosis");
    match reporter.diagnose(&failure).await {
        Ok(Some(diagnosis)) => {
            info!(operation = scope.operation, "diagnosis:\n{diagnosis}");
        }
        Ok(None) => {}
        Err(report_err) => {
            warn!(
                operation = scope.operation,
                reporter = reporter.name(),
                error = %report_err,
                "diagnosis failed"
            );
        }
    }

    Err(err)
}
