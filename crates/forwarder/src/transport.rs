//! Transport abstraction
//!
//! One POST, one response. No retries, no redirects handling beyond what the
//! implementation does by default.

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, StatusCode};

use crate::error::TransportError;

/// A request ready to be sent downstream
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    /// Destination URL
    pub url: String,
    /// Filtered headers
    pub headers: HeaderMap,
    /// JSON payload
    pub body: Bytes,
}

/// What the destination answered
#[derive(Debug, Clone)]
pub struct DownstreamResponse {
    /// Status code, returned to the client as is
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
}

impl DownstreamResponse {
    /// Create a response with no headers
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Whether the status counts as an error for metrics
    #[inline]
    pub fn is_error(&self) -> bool {
        self.status.as_u16() >= 400
    }
}

/// Sends outbound requests
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and wait for the full response
    async fn send(&self, request: OutboundRequest) -> Result<DownstreamResponse, TransportError>;
}
