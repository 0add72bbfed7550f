//! HTTP response helpers

use axum::Json;
use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pokeproxy_pipeline::{PipelineError, PipelineOutcome};

/// Render a successful pipeline outcome
///
/// A forwarded request returns the downstream status, headers and body as
/// is; the pipeline already removed hop-by-hop headers.
pub fn outcome_response(outcome: PipelineOutcome) -> Response {
    match outcome {
        PipelineOutcome::NoMatch => {
            (StatusCode::OK, Json(serde_json::json!({"status": "no_match"}))).into_response()
        }
        PipelineOutcome::Forwarded(downstream) => {
            let mut response = Response::new(Body::from(downstream.body));
            *response.status_mut() = downstream.status;
            *response.headers_mut() = downstream.headers;
            response
        }
    }
}

/// Render a pipeline error as `{"detail": "..."}`
pub fn error_response(err: &PipelineError) -> Response {
    let status = err.status_code();
    tracing::debug!(error = %err, status = status.as_u16(), "request rejected");
    (status, Json(serde_json::json!({"detail": err.detail()}))).into_response()
}
