//! Downstream dispatcher
//!
//! One forwarding attempt per request, classified into success (any status)
//! or a [`DispatchError`].

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::HeaderMap;
use tracing::{debug, error};

use crate::error::DispatchError;
use crate::headers::{filter_response_headers, outbound_headers};
use crate::transport::{DownstreamResponse, OutboundRequest, Transport};

/// Default ceiling for one forwarding attempt
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Forwards payloads through a [`Transport`]
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl Dispatcher {
    /// Create a dispatcher with an overall timeout per attempt
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// Create a dispatcher with the default 30s timeout
    pub fn with_default_timeout(transport: Arc<dyn Transport>) -> Self {
        Self::new(transport, DEFAULT_TIMEOUT)
    }

    /// Overall timeout per attempt
    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Forward a payload to `url`
    ///
    /// Outbound headers are the inbound ones minus request-scoped headers,
    /// plus `content-type: application/json` and `x-grd-reason: <reason>`.
    /// The returned response has hop-by-hop headers removed.
    ///
    /// # Errors
    ///
    /// - `DispatchError::Timeout` if the attempt exceeds the timeout
    /// - `DispatchError::Unreachable` if the destination cannot be reached
    /// - `DispatchError::Unexpected` for anything else
    pub async fn dispatch(
        &self,
        url: &str,
        payload: Bytes,
        reason: &str,
        inbound_headers: &HeaderMap,
    ) -> Result<DownstreamResponse, DispatchError> {
        let Some(headers) = outbound_headers(inbound_headers, reason) else {
            error!(destination = %url, "routing reason is not a valid header value");
            return Err(DispatchError::unexpected(url, "invalid reason header"));
        };

        let request = OutboundRequest {
            url: url.to_owned(),
            headers,
            body: payload,
        };

        let result = match tokio::time::timeout(self.timeout, self.transport.send(request)).await
        {
            Ok(result) => result.map_err(|e| DispatchError::from_transport(url, e)),
            Err(_) => Err(DispatchError::Timeout {
                url: url.to_owned(),
            }),
        };

        match result {
            Ok(mut response) => {
                debug!(destination = %url, status = response.status.as_u16(), "downstream responded");
                response.headers = filter_response_headers(&response.headers);
                Ok(response)
            }
            Err(err) => {
                log_failure(&err, self.timeout);
                Err(err)
            }
        }
    }
}

fn log_failure(err: &DispatchError, timeout: Duration) {
    match err {
        DispatchError::Timeout { url } => {
            error!(destination = %url, timeout_ms = timeout.as_millis() as u64, "timeout forwarding request");
        }
        DispatchError::Unreachable { url, reason } => {
            error!(destination = %url, cause = %reason, "connection error forwarding request");
        }
        DispatchError::Unexpected { url, reason } => {
            error!(destination = %url, cause = %reason, "unexpected error forwarding request");
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
