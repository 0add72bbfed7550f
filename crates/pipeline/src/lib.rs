//! PokeProxy - Pipeline
//!
//! The request processing pipeline: authenticate, decode, route, dispatch
//! and record.
//!
//! # Architecture
//!
//! ```text
//! InboundRequest ──► SignatureVerifier ──► decode() ──► RuleSet ──► Dispatcher ──► Transport
//!                                                          │             │
//!                                                          └──► DestinationMetrics ◄┘
//! ```
//!
//! # Key Design
//!
//! - **Explicit collaborators**: verifier, rules, dispatcher and metrics store
//!   are handed to the builder, nothing is global
//! - **Typed failures**: every failure is a `PipelineError` carrying its HTTP
//!   status and client-facing detail
//! - **Record once**: a request that got past decoding is recorded exactly
//!   once, under the matched URL or `__unmatched__`
//!
//! # Example
//!
//! ```ignore
//! let pipeline = Pipeline::builder(dispatcher, metrics)
//!     .verifier(SignatureVerifier::new(&secret).unwrap())
//!     .rules(Arc::new(rules))
//!     .max_body_size(4096)
//!     .build();
//!
//! match pipeline.process(InboundRequest::new(headers, body)).await {
//!     Ok(PipelineOutcome::NoMatch) => { /* {"status":"no_match"} */ }
//!     Ok(PipelineOutcome::Forwarded(response)) => { /* pass through */ }
//!     Err(e) => { /* e.status_code(), e.detail() */ }
//! }
//! ```

mod error;
mod pipeline;

pub use error::{PipelineError, Result};
pub use pipeline::{
    DEFAULT_MAX_BODY_SIZE, InboundRequest, Pipeline, PipelineBuilder, PipelineOutcome,
};
