//! Scripted transport for tests
//!
//! `MockTransport` returns queued outcomes in order (or a fixed fallback)
//! and keeps every request it was given for later inspection.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use http::StatusCode;
use parking_lot::Mutex;

use crate::error::TransportError;
use crate::transport::{DownstreamResponse, OutboundRequest, Transport};

type Outcome = Result<DownstreamResponse, TransportError>;

/// Transport that answers from a script
#[derive(Debug)]
pub struct MockTransport {
    script: Mutex<VecDeque<Outcome>>,
    fallback: Outcome,
    delay: Option<Duration>,
    requests: Mutex<Vec<OutboundRequest>>,
}

impl MockTransport {
    /// Always answer with the given status and body
    pub fn responding(status: StatusCode, body: impl Into<bytes::Bytes>) -> Self {
        Self::with_fallback(Ok(DownstreamResponse::new(status, body)))
    }

    /// Always answer with the given response
    pub fn with_response(response: DownstreamResponse) -> Self {
        Self::with_fallback(Ok(response))
    }

    /// Always fail with the given error
    pub fn failing(err: TransportError) -> Self {
        Self::with_fallback(Err(err))
    }

    fn with_fallback(fallback: Outcome) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sleep before answering
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a one-off outcome, used before the fallback
    pub fn push(&self, outcome: Outcome) {
        self.script.lock().push_back(outcome);
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests received
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: OutboundRequest) -> Result<DownstreamResponse, TransportError> {
        self.requests.lock().push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.script.lock().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }
}
