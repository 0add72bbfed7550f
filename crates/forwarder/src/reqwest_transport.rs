//! reqwest-backed transport
//!
//! Shares one connection pool across all requests and destinations.

use async_trait::async_trait;
use pokeproxy_config::UpstreamConfig;

use crate::error::TransportError;
use crate::transport::{DownstreamResponse, OutboundRequest, Transport};

/// Production transport over a pooled `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client from upstream settings
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Other` if the client cannot be built (TLS
    /// backend initialisation).
    pub fn new(config: &UpstreamConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout)
            // Redirects are relayed to the caller, not followed
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| TransportError::other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: OutboundRequest) -> Result<DownstreamResponse, TransportError> {
        let response = self
            .client
            .post(&request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(classify_error)?;

        Ok(DownstreamResponse {
            status,
            headers,
            body,
        })
    }
}

/// Map a reqwest error onto the transport taxonomy
///
/// Anything that happened while talking to the destination counts as a
/// connection failure; builder and redirect errors are unexpected.
fn classify_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::timeout(error.to_string())
    } else if error.is_connect() || error.is_request() || error.is_body() || error.is_decode() {
        TransportError::connect(error.to_string())
    } else {
        TransportError::other(error.to_string())
    }
}
