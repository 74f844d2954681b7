use async_trait::async_trait;
use std::sync::Mutex;
use steer_diagnose::{
    observe, DiagnoseError, DiagnoseResult, DiagnosticReporter, Failure, NoopReporter, Scope,
};
use steer_types::ErrorVariant;

#[derive(Debug, PartialEq, Eq)]
enum TestError {
    Boom(u32),
}

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestError::Boom(n) => write!(f, "boom #{n}"),
        }
    }
}

impl ErrorVariant for TestError {
    fn variant(&self) -> &'static str {
        match self {
            TestError::Boom(_) => "TestError::Boom",
        }
    }
}

/// Records every failure and answers with a fixed diagnosis.
#[derive(Default)]
struct RecordingReporter {
    seen: Mutex<Vec<Failure>>,
}

#[async_trait]
impl DiagnosticReporter for RecordingReporter {
    async fn diagnose(&self, failure: &Failure) -> DiagnoseResult<Option<String>> {
        self.seen.lock().unwrap().push(failure.clone());
        Ok(Some("check the input".into()))
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

struct BrokenReporter;

#[async_trait]
impl DiagnosticReporter for BrokenReporter {
    async fn diagnose(&self, _failure: &Failure) -> DiagnoseResult<Option<String>> {
        Err(DiagnoseError::EmptyResponse)
    }

    fn name(&self) -> &'static str {
        "broken"
    }
}

#[tokio::test]
async fn success_passes_through_without_reporting() {
    let reporter = RecordingReporter::default();
    let result: Result<u32, TestError> =
        observe(&reporter, Scope::new("ok_op"), async { Ok(7) }).await;
    assert_eq!(result, Ok(7));
    assert!(reporter.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failure_is_returned_unchanged() {
    let reporter = RecordingReporter::default();
    let result: Result<u32, TestError> =
        observe(&reporter, Scope::new("bad_op"), async { Err(TestError::Boom(3)) }).await;
    assert_eq!(result, Err(TestError::Boom(3)));
}

#[tokio::test]
async fn failure_is_reported_once_with_context() {
    let reporter = RecordingReporter::default();
    let scope = Scope::new("bad_op").with_source("fn bad_op() {}");
    let _ = observe(&reporter, scope, async { Err::<(), _>(TestError::Boom(9)) }).await;

    let seen = reporter.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let failure = &seen[0];
    assert_eq!(failure.operation, "bad_op");
    assert_eq!(failure.error, "boom #9");
    assert_eq!(failure.error_type, "TestError::Boom");
    assert!(failure.file.ends_with("boundary_tests.rs"));
    assert_eq!(failure.source, Some("fn bad_op() {}"));
}

#[tokio::test]
async fn scope_records_caller_line() {
    let line = line!() + 1;
    let scope = Scope::new("here");
    assert_eq!(scope.location.line(), line);
    assert!(scope.source.is_none());
}

#[tokio::test]
async fn broken_reporter_does_not_replace_error() {
    let result: Result<(), TestError> =
        observe(&BrokenReporter, Scope::new("op"), async { Err(TestError::Boom(1)) }).await;
    assert_eq!(result, Err(TestError::Boom(1)));
}

#[tokio::test]
async fn noop_reporter_has_nothing_to_say() {
    let failure = Failure {
        operation: "op",
        error: "e".into(),
        error_type: "E",
        file: "f.rs",
        line: 1,
        source: None,
    };
    assert_eq!(NoopReporter.diagnose(&failure).await.unwrap(), None);
    assert_eq!(NoopReporter.name(), "noop");
}

#[tokio::test]
async fn each_failure_is_reported() {
    let reporter = RecordingReporter::default();
    for n in 0..3 {
        let _ = observe(&reporter, Scope::new("loop"), async move {
            Err::<(), _>(TestError::Boom(n))
        })
        .await;
    }
    let errors: Vec<String> = reporter
        .seen
        .lock()
        .unwrap()
        .iter()
        .map(|f| f.error.clone())
        .collect();
    assert_eq!(errors, vec!["boom #0", "boom #1", "boom #2"]);
}
