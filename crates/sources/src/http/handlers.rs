//! HTTP route handlers
//!
//! - `/stream` - Signed protobuf ingestion
//! - `/health` - Health check
//! - `/stats` - Destination metrics snapshot

use std::sync::Arc;

use axum::Json;
use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pokeproxy_pipeline::{InboundRequest, Pipeline, PipelineError};

use super::response::{error_response, outcome_response};

/// Shared state for handlers
pub struct HandlerState {
    pub pipeline: Arc<Pipeline>,
}

/// POST /stream - Authenticate, route and forward one Pokemon
pub async fn stream(State(state): State<Arc<HandlerState>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let pipeline = &state.pipeline;

    // Cheap checks first, the body is only read for plausible requests
    if let Err(e) = pipeline.check_preconditions(&parts.headers) {
        return error_response(&e);
    }

    let limit = pipeline.max_body_size();
    let body = match to_bytes(body, limit.saturating_add(1)).await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(error = %e, limit, "failed to read request body");
            return error_response(&PipelineError::BodyTooLarge { limit });
        }
    };

    match pipeline
        .process(InboundRequest::new(parts.headers, body))
        .await
    {
        Ok(outcome) => outcome_response(outcome),
        Err(e) => error_response(&e),
    }
}

/// GET /health - Health check
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "healthy"})))
}

/// GET /stats - Per-destination metrics, least recently used first
pub async fn stats(State(state): State<Arc<HandlerState>>) -> impl IntoResponse {
    Json(state.pipeline.metrics().snapshot())
}
