//! Pipeline - one signed request from body to downstream response
//!
//! ```text
//! Received ─► Authenticated ─► Decoded ─► Matched ───► Dispatched ─────┐
//!                                    │                 DispatchFailed ─┼─► Recorded ─► Responded
//!                                    └──► Unmatched ───────────────────┘
//! ```
//!
//! Authentication and decode failures short-circuit before anything is
//! recorded. Every request that gets past decoding is recorded exactly once.

use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http::HeaderMap;
use http::header::CONTENT_LENGTH;
use pokeproxy_auth::{SIGNATURE_HEADER, SignatureVerifier};
use pokeproxy_forwarder::{Dispatcher, DownstreamResponse};
use pokeproxy_metrics::{DestinationMetrics, UNMATCHED_DESTINATION};
use pokeproxy_protocol::{decode, encode_json};
use pokeproxy_routing::RuleSet;
use tracing::{error, info, warn};

use crate::error::{PipelineError, Result};

/// Default maximum body size in bytes
pub const DEFAULT_MAX_BODY_SIZE: usize = 4096;

/// An inbound request as seen by the pipeline
#[derive(Debug, Clone)]
pub struct InboundRequest {
    /// All request headers, forwarded downstream after filtering
    pub headers: HeaderMap,
    /// Raw protobuf body
    pub body: Bytes,
}

impl InboundRequest {
    /// Create a request from headers and body
    pub fn new(headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            headers,
            body: body.into(),
        }
    }
}

/// What happened to a request that did not fail
#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    /// No rule matched; the client gets `{"status":"no_match"}`
    NoMatch,
    /// Forwarded; the downstream response is returned as is
    Forwarded(DownstreamResponse),
}

impl PipelineOutcome {
    /// Whether a rule matched
    #[inline]
    pub fn is_forwarded(&self) -> bool {
        matches!(self, Self::Forwarded(_))
    }
}

/// Request processing pipeline
///
/// Holds every collaborator explicitly. The verifier and rule set are
/// optional so a misconfigured proxy still serves `/health` and answers
/// `/stream` with 500 instead of refusing to start.
#[derive(Debug, Clone)]
pub struct Pipeline {
    verifier: Option<Arc<SignatureVerifier>>,
    rules: Option<Arc<RuleSet>>,
    dispatcher: Dispatcher,
    metrics: Arc<DestinationMetrics>,
    max_body_size: usize,
}

impl Pipeline {
    /// Start building a pipeline around its two required collaborators
    pub fn builder(dispatcher: Dispatcher, metrics: Arc<DestinationMetrics>) -> PipelineBuilder {
        PipelineBuilder {
            verifier: None,
            rules: None,
            dispatcher,
            metrics,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }

    /// Shared metrics store
    #[inline]
    pub fn metrics(&self) -> &Arc<DestinationMetrics> {
        &self.metrics
    }

    /// Maximum accepted body size
    #[inline]
    pub fn max_body_size(&self) -> usize {
        self.max_body_size
    }

    /// Loaded rule set, if any
    #[inline]
    pub fn rules(&self) -> Option<&RuleSet> {
        self.rules.as_deref()
    }

    /// Whether both the secret and the rules are loaded
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.verifier.is_some() && self.rules.is_some()
    }

    /// Checks that can run before the body is read
    ///
    /// In order: declared `content-length` over the limit (an unparseable
    /// value is ignored), missing or blank signature, missing secret.
    ///
    /// # Errors
    ///
    /// `BodyTooLarge`, `AuthMissing` or `ConfigNotLoaded`.
    pub fn check_preconditions(&self, headers: &HeaderMap) -> Result<()> {
        if let Some(declared) = declared_length(headers)
            && declared > self.max_body_size as u64
        {
            return Err(PipelineError::BodyTooLarge {
                limit: self.max_body_size,
            });
        }

        if !has_signature(headers) {
            return Err(PipelineError::AuthMissing);
        }

        if self.verifier.is_none() {
            error!("secret not configured, rejecting request");
            return Err(PipelineError::ConfigNotLoaded("secret"));
        }

        Ok(())
    }

    /// Process one request
    ///
    /// Runs the precondition checks again, so callers that already read the
    /// body may call this directly.
    ///
    /// # Errors
    ///
    /// Any [`PipelineError`]; see its status mapping.
    pub async fn process(&self, request: InboundRequest) -> Result<PipelineOutcome> {
        self.check_preconditions(&request.headers)?;
        let verifier = self
            .verifier
            .as_deref()
            .ok_or(PipelineError::ConfigNotLoaded("secret"))?;

        let body = &request.body;
        if body.len() > self.max_body_size {
            return Err(PipelineError::BodyTooLarge {
                limit: self.max_body_size,
            });
        }
        if body.is_empty() {
            return Err(PipelineError::BodyEmpty);
        }

        // A non-UTF-8 signature can never match a hex digest
        let presented = request
            .headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !verifier.verify(body, presented) {
            warn!(body_len = body.len(), "invalid signature");
            return Err(PipelineError::AuthInvalid);
        }

        let pokemon = decode(body).map_err(|e| {
            warn!(error = %e, "failed to decode pokemon");
            PipelineError::from(e)
        })?;
        info!(pokemon = %pokemon.name, number = pokemon.number, "received pokemon");

        let Some(rules) = self.rules.as_deref() else {
            error!("routing rules not loaded, rejecting request");
            return Err(PipelineError::ConfigNotLoaded("rules"));
        };

        let incoming_bytes = body.len() as u64;

        let Some(rule) = rules.find_match(&pokemon) else {
            warn!(pokemon = %pokemon.name, "no rule matched");
            self.metrics
                .record(UNMATCHED_DESTINATION, incoming_bytes, 0, 0.0, false);
            return Ok(PipelineOutcome::NoMatch);
        };
        info!(reason = %rule.reason(), destination = %rule.url(), "matched rule");

        let payload = Bytes::from(encode_json(&pokemon).map_err(|e| {
            error!(error = %e, "failed to encode payload");
            PipelineError::from(e)
        })?);
        let outgoing_bytes = payload.len() as u64;

        let start = Instant::now();
        let result = self
            .dispatcher
            .dispatch(rule.url(), payload, rule.reason(), &request.headers)
            .await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        let is_error = result.as_ref().map_or(true, DownstreamResponse::is_error);
        self.metrics.record(
            rule.url(),
            incoming_bytes,
            outgoing_bytes,
            elapsed_ms,
            is_error,
        );

        result
            .map(PipelineOutcome::Forwarded)
            .map_err(PipelineError::from)
    }
}

/// Builder for [`Pipeline`]
#[derive(Debug)]
pub struct PipelineBuilder {
    verifier: Option<Arc<SignatureVerifier>>,
    rules: Option<Arc<RuleSet>>,
    dispatcher: Dispatcher,
    metrics: Arc<DestinationMetrics>,
    max_body_size: usize,
}

impl PipelineBuilder {
    /// Set the signature verifier
    #[must_use]
    pub fn verifier(mut self, verifier: SignatureVerifier) -> Self {
        self.verifier = Some(Arc::new(verifier));
        self
    }

    /// Set the routing rules
    #[must_use]
    pub fn rules(mut self, rules: Arc<RuleSet>) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Set the maximum accepted body size
    #[must_use]
    pub fn max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        Pipeline {
            verifier: self.verifier,
            rules: self.rules,
            dispatcher: self.dispatcher,
            metrics: self.metrics,
            max_body_size: self.max_body_size,
        }
    }
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// A signature header with only whitespace counts as absent
fn has_signature(headers: &HeaderMap) -> bool {
    headers
        .get(SIGNATURE_HEADER)
        .is_some_and(|v| !v.as_bytes().iter().all(u8::is_ascii_whitespace))
}
