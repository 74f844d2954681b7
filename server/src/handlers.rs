//! HTTP handlers.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use steer_types::{ConditionRecord, UserId};
use tracing::{debug, info};

use crate::{openapi, ApiError, AppState};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UniqueUrlResponse {
    pub unique_url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SubmitResponse {
    pub success: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub store: String,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ValidateQuery {
    #[serde(alias = "userId")]
    user_id: Option<String>,
}

pub(crate) async fn get_unique_url(State(state): State<AppState>) -> Json<UniqueUrlResponse> {
    Json(UniqueUrlResponse {
        unique_url: state.service.issue_url(),
    })
}

pub(crate) async fn submit_form(
    State(state): State<AppState>,
    Json(record): Json<ConditionRecord>,
) -> Result<Json<SubmitResponse>, ApiError> {
    if record.user_id.is_blank() {
        return Err(ApiError::BadRequest("userId must not be empty".into()));
    }
    let user_id = record.user_id.clone();
    state.service.submit_conditions(record).await?;
    info!(user_id = %user_id, "stored conditions");
    Ok(Json(SubmitResponse { success: true }))
}

/// Responds with the plain-text verdict.
pub(crate) async fn validate_conditions(
    State(state): State<AppState>,
    Path(candidate): Path<String>,
    Query(query): Query<ValidateQuery>,
) -> Result<String, ApiError> {
    let raw = query
        .user_id
        .ok_or_else(|| ApiError::BadRequest("missing user_id query parameter".into()))?;
    let user_id = UserId::parse(&raw)?;
    let verdict = state.service.validate(&user_id, &candidate).await?;
    Ok(verdict.to_string())
}

/// Serves the plugin manifest file unmodified.
pub(crate) async fn plugin_manifest(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let path = state.manifest_path.as_path();
    let body = tokio::fs::read_to_string(path).await.map_err(|e| {
        debug!(path = %path.display(), error = %e, "manifest unavailable");
        match e.kind() {
            std::io::ErrorKind::NotFound => ApiError::NotFound("plugin manifest".into()),
            _ => ApiError::Internal(format!("failed to read plugin manifest: {e}")),
        }
    })?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

/// Describes the plugin-facing routes for the manifest's `api.url`.
pub(crate) async fn openapi_document(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(openapi::document(state.service.base_url()))
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        store: state.service.store_backend().into(),
    })
}
