//! HTTP API for steer.
//!
//! Issues per-user URLs, stores each user's string conditions and evaluates
//! candidate strings against them. The store and the diagnostic reporter are
//! constructed once at startup and shared by every request through
//! [`AppState`].

pub mod config;
mod error;
mod handlers;
pub mod openapi;
mod service;

pub use config::{Config, ConfigError, StoreKind};
pub use error::{ApiError, ErrorBody};
pub use handlers::{HealthResponse, SubmitResponse, UniqueUrlResponse};
pub use service::ConditionService;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Shared request state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ConditionService>,
    pub manifest_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(service: Arc<ConditionService>, manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            service,
            manifest_path: Arc::new(manifest_path.into()),
        }
    }
}

/// Build a CORS layer that admits credentialed requests from `origins`.
///
/// Origins that are not valid header values are skipped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Build the HTTP API router with the given state.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/get_unique_url", get(handlers::get_unique_url))
        .route("/get_unique_url/", get(handlers::get_unique_url))
        .route("/submit-form", post(handlers::submit_form))
        .route(
            "/validate-conditions/{candidate}",
            post(handlers::validate_conditions),
        )
        .route("/.well-known/ai-plugin.json", get(handlers::plugin_manifest))
        .route("/openapi.json", get(handlers::openapi_document))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
