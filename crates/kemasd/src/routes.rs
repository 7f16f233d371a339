//! API routes for kemasd.

use crate::error::ApiError;
use crate::extract;
use crate::server::AppState;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use kemas_common::{DebugEcho, HealthResponse, NormalizeRequest, NormalizeResponse};
use std::sync::Arc;
use tracing::info;

type AppStateArc = Arc<AppState>;

// ============================================================================
// Normalize Routes
// ============================================================================

pub fn normalize_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/normalize", post(normalize_text))
}

/// Proxy one normalization request: validate, call the generative table,
/// extract a stable result from the raw payload.
async fn normalize_text(
    State(state): State<AppStateArc>,
    Json(req): Json<NormalizeRequest>,
) -> Result<Json<NormalizeResponse>, ApiError> {
    let input = req.input_text.as_deref().unwrap_or("").trim().to_string();
    if input.is_empty() {
        return Err(ApiError::EmptyInput);
    }

    // Credentials are checked per request so an unconfigured daemon can
    // still start and serve health checks.
    let client = state.jamai.as_ref().ok_or(ApiError::MissingCredentials)?;

    info!("[N]  Normalizing ({} chars)", input.len());

    let payload = client.add_row(&input).await?;
    let result = extract::extract_result(&payload);

    info!(
        "[N]  Done - {} change(s), text {} chars",
        result.normalization_summary.len(),
        result.normalized_text.len()
    );

    Ok(Json(NormalizeResponse {
        success: true,
        normalized_text: result.normalized_text,
        normalization_summary: result.normalization_summary,
        informal_features_percentage: result.informal_features,
        row_id: result.row_id,
        debug: DebugEcho::from_payload(&payload),
    }))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
