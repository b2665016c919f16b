//! Route handlers.

use crate::{ApiError, AppState};
use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use folio_core::{ContinuationOutcome, ContinuationRequest, World};
use folio_error::FolioError;
use folio_interface::CompletionDriver;
use folio_storage::validate_world_name;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Body of `POST /api/worlds`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWorldRequest {
    /// World name
    pub name: String,
    /// Setting description
    #[serde(default)]
    pub description: serde_json::Value,
}

/// Body returned by `POST /api/clear_worlds`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearWorldsResponse {
    /// Whether every World was cleared
    pub success: bool,
    /// Human-readable result
    pub message: String,
    /// Names of the cleared Worlds
    pub cleared_worlds: Vec<String>,
}

/// Creates the API router.
pub fn create_router<D: CompletionDriver + 'static>(state: AppState<D>) -> Router {
    Router::new()
        .route("/api/status", get(status))
        .route("/api/worlds", post(create_world::<D>))
        .route("/api/generate_story", post(generate_story::<D>))
        .route("/api/clear_worlds", post(clear_worlds::<D>))
        .with_state(state)
}

/// Health check endpoint.
async fn status() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({"status": "running", "message": "Server is healthy"})),
    )
}

#[tracing::instrument(skip(state, payload))]
async fn create_world<D: CompletionDriver + 'static>(
    State(state): State<AppState<D>>,
    payload: Result<Json<CreateWorldRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<World>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    validate_world_name(&request.name).map_err(FolioError::from)?;

    let _guard = state.locks().lock(&request.name).await;
    let world = state
        .store()
        .create(&request.name, request.description)
        .await?;

    Ok((StatusCode::CREATED, Json(world)))
}

#[tracing::instrument(skip(state, payload))]
async fn generate_story<D: CompletionDriver + 'static>(
    State(state): State<AppState<D>>,
    payload: Result<Json<ContinuationRequest>, JsonRejection>,
) -> Result<Json<ContinuationOutcome>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    validate_world_name(request.world_name()).map_err(FolioError::from)?;

    let _guard = state.locks().lock(request.world_name()).await;
    let outcome = state.executor().continue_segment(&request).await?;

    Ok(Json(outcome))
}

#[tracing::instrument(skip(state))]
async fn clear_worlds<D: CompletionDriver + 'static>(
    State(state): State<AppState<D>>,
) -> Result<Json<ClearWorldsResponse>, ApiError> {
    let names = state.store().list().await?;

    let mut cleared_worlds = Vec::with_capacity(names.len());
    for name in names {
        let _guard = state.locks().lock(&name).await;
        state.store().clear(&name).await?;
        cleared_worlds.push(name);
    }

    tracing::info!(count = cleared_worlds.len(), "Cleared worlds");
    Ok(Json(ClearWorldsResponse {
        success: true,
        message: format!("Successfully cleared {} world(s)", cleared_worlds.len()),
        cleared_worlds,
    }))
}
