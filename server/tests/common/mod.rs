//! Shared helpers for API tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use steer_diagnose::{DiagnoseResult, DiagnosticReporter, Failure};
use steer_server::{build_router, cors_layer, AppState, ConditionService};
use steer_store::MemoryConditionStore;

pub const BASE_URL: &str = "http://steer.test";

/// Records the failures it is asked to diagnose.
#[derive(Default)]
pub struct RecordingReporter {
    pub failures: Mutex<Vec<Failure>>,
}

#[async_trait]
impl DiagnosticReporter for RecordingReporter {
    async fn diagnose(&self, failure: &Failure) -> DiagnoseResult<Option<String>> {
        self.failures.lock().unwrap().push(failure.clone());
        Ok(Some("diagnosed".into()))
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

impl RecordingReporter {
    pub fn operations(&self) -> Vec<&'static str> {
        self.failures
            .lock()
            .unwrap()
            .iter()
            .map(|f| f.operation)
            .collect()
    }
}

pub struct TestServer {
    pub base: String,
    pub store: Arc<MemoryConditionStore>,
    pub reporter: Arc<RecordingReporter>,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

/// Spin up the HTTP server on an OS-assigned port.
pub async fn spawn_test_server() -> TestServer {
    spawn_with_manifest(PathBuf::from("/nonexistent/ai-plugin.json")).await
}

pub async fn spawn_with_manifest(manifest: PathBuf) -> TestServer {
    let store = Arc::new(MemoryConditionStore::new());
    let reporter = Arc::new(RecordingReporter::default());
    let service = Arc::new(ConditionService::new(
        store.clone(),
        reporter.clone(),
        BASE_URL,
    ));
    let origins = vec![
        "https://chat.openai.com".to_string(),
        "http://localhost:8001".to_string(),
    ];
    let app = build_router(AppState::new(service, manifest), cors_layer(&origins));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base: format!("http://127.0.0.1:{}", port),
        store,
        reporter,
        client: reqwest::Client::new(),
    }
}
