//! PokeProxy - Forwarder
//!
//! Sends the JSON payload of a matched Pokemon to its destination and
//! classifies what went wrong when it could not.
//!
//! # Overview
//!
//! ```text
//! Dispatcher::dispatch(url, payload, reason, inbound headers)
//!     │
//!     ├──► outbound_headers()   strip request-scoped headers, add reason
//!     ├──► Transport::send()    under an overall timeout
//!     └──► filter_response_headers()   strip hop-by-hop headers
//! ```
//!
//! | Failure | `DispatchError` | Status |
//! |---------|-----------------|--------|
//! | timeout | `Timeout` | 504 |
//! | connection / request failure | `Unreachable` | 502 |
//! | anything else | `Unexpected` | 502 |
//!
//! A downstream status >= 400 is not a dispatch failure; the response is
//! returned as is (minus hop-by-hop headers).
//!
//! The transport is a trait so the pipeline can be tested without a network;
//! `ReqwestTransport` is the production implementation.

mod dispatcher;
mod error;
mod headers;
mod reqwest_transport;
mod transport;

/// Scripted transport for tests
pub mod test_utils;

#[cfg(test)]
mod reqwest_transport_test;

pub use dispatcher::{DEFAULT_TIMEOUT, Dispatcher};
pub use error::{DispatchError, TransportError};
pub use headers::{
    HOP_BY_HOP_HEADERS, REASON_HEADER, REQUEST_SCOPED_HEADERS, filter_response_headers,
    outbound_headers,
};
pub use reqwest_transport::ReqwestTransport;
pub use transport::{DownstreamResponse, OutboundRequest, Transport};

// Re-export http types used in the public API
pub use http::{HeaderMap, HeaderValue, StatusCode};
