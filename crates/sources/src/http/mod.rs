//! HTTP Source - signed Pokemon ingestion
//!
//! # Endpoints
//!
//! - `POST /stream` - Protobuf `Pokemon` body signed with `X-Grd-Signature`
//! - `GET /health` - Health check
//! - `GET /stats` - Per-destination traffic metrics
//!
//! # Protocol
//!
//! ```text
//! POST /stream
//! Content-Type: application/octet-stream
//! X-Grd-Signature: <hex HMAC-SHA256 of the body>
//!
//! <protobuf Pokemon bytes>
//! ```
//!
//! The declared length and the signature header are checked before the body
//! is read; the body itself is read with a hard cap of `max_body_size + 1`.
//!
//! # Example
//!
//! ```ignore
//! use pokeproxy_sources::http::{HttpSource, HttpSourceConfig};
//!
//! let source = HttpSource::new(HttpSourceConfig::with_port(8000), pipeline);
//! source.run(cancel_token).await?;
//! ```

mod config;
mod error;
mod handlers;
mod response;


use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::Router;
use axum::routing::{get, post};
use pokeproxy_pipeline::Pipeline;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

pub use config::HttpSourceConfig;
pub use error::HttpSourceError;

use handlers::{HandlerState, health_check, stats, stream};

/// HTTP source in front of the pipeline
pub struct HttpSource {
    config: HttpSourceConfig,
    pipeline: Arc<Pipeline>,
    running: Arc<AtomicBool>,
}

impl HttpSource {
    /// Create a new HTTP source
    pub fn new(config: HttpSourceConfig, pipeline: Arc<Pipeline>) -> Self {
        Self {
            config,
            pipeline,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Check if the source is running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Run the HTTP source
    ///
    /// Binds to the configured address and serves until `cancel` fires, then
    /// lets in-flight requests finish.
    pub async fn run(self, cancel: CancellationToken) -> Result<(), HttpSourceError> {
        let bind_addr = self.config.bind_address();

        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| HttpSourceError::Bind {
                address: bind_addr.clone(),
                source: e,
            })?;

        self.serve(listener, cancel).await
    }

    /// Serve on an already bound listener
    pub async fn serve(
        self,
        listener: TcpListener,
        cancel: CancellationToken,
    ) -> Result<(), HttpSourceError> {
        let local_addr = listener.local_addr().map_err(HttpSourceError::Io)?;

        self.running.store(true, Ordering::Relaxed);

        tracing::info!(
            address = %local_addr,
            max_body_size = self.pipeline.max_body_size(),
            ready = self.pipeline.is_ready(),
            "HTTP source listening"
        );

        let state = Arc::new(HandlerState {
            pipeline: Arc::clone(&self.pipeline),
        });

        let server = axum::serve(listener, build_router(state))
            .with_graceful_shutdown(shutdown_signal(cancel));

        let result = server.await.map_err(|e| HttpSourceError::Http(e.to_string()));

        self.running.store(false, Ordering::Relaxed);

        tracing::info!(address = %local_addr, "HTTP source stopped");

        result
    }
}

/// Build the axum router
fn build_router(state: Arc<HandlerState>) -> Router {
    Router::new()
        .route("/stream", post(stream))
        .route("/health", get(health_check))
        .route("/stats", get(stats))
        .with_state(state)
}

/// Shutdown signal future
async fn shutdown_signal(cancel: CancellationToken) {
    cancel.cancelled().await;
}
