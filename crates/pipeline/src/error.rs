//! Pipeline error types
//!
//! Every way a request can fail, with the HTTP status and the short detail
//! text shown to the client.

use http::StatusCode;
use pokeproxy_forwarder::DispatchError;
use pokeproxy_protocol::ProtocolError;
use thiserror::Error;

/// Pipeline errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PipelineError {
    /// No signature header on the request
    #[error("missing signature header")]
    AuthMissing,

    /// Signature does not match the body
    #[error("invalid signature")]
    AuthInvalid,

    /// Declared or actual body size is over the limit
    #[error("request body too large (limit {limit} bytes)")]
    BodyTooLarge {
        /// Configured maximum
        limit: usize,
    },

    /// Request body is empty
    #[error("empty request body")]
    BodyEmpty,

    /// Body is not a valid protobuf Pokemon
    #[error("malformed protobuf body: {0}")]
    DecodeMalformed(String),

    /// Body decoded but a required field is empty
    #[error("pokemon missing required field: {0}")]
    DecodeMissingField(&'static str),

    /// Secret or rules were not loaded
    #[error("{0} not loaded")]
    ConfigNotLoaded(&'static str),

    /// JSON payload could not be produced
    #[error("failed to encode payload: {0}")]
    Encode(String),

    /// Destination did not answer in time
    #[error("timeout forwarding to {url}")]
    DownstreamTimeout {
        /// Destination URL
        url: String,
    },

    /// Destination could not be reached
    #[error("connection error to {url}: {reason}")]
    DownstreamUnreachable {
        /// Destination URL
        url: String,
        /// Underlying cause
        reason: String,
    },

    /// Forwarding failed for another reason
    #[error("failed forwarding to {url}: {reason}")]
    DownstreamUnexpectedFailure {
        /// Destination URL
        url: String,
        /// Underlying cause
        reason: String,
    },
}

impl PipelineError {
    /// HTTP status returned to the client
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::AuthMissing | Self::AuthInvalid => StatusCode::UNAUTHORIZED,
            Self::BodyTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::BodyEmpty | Self::DecodeMalformed(_) | Self::DecodeMissingField(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::ConfigNotLoaded(_) | Self::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::DownstreamTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::DownstreamUnreachable { .. } | Self::DownstreamUnexpectedFailure { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    /// Short text returned to the client as `{"detail": ...}`
    ///
    /// Never includes internal causes; those go to the log.
    pub fn detail(&self) -> &'static str {
        match self {
            Self::AuthMissing => "Missing X-Grd-Signature header",
            Self::AuthInvalid => "Invalid signature",
            Self::BodyTooLarge { .. } => "Request body too large",
            Self::BodyEmpty => "Empty request body",
            Self::DecodeMalformed(_) => "Failed to parse protobuf",
            Self::DecodeMissingField(_) => "Pokemon missing name field",
            Self::ConfigNotLoaded(_) | Self::Encode(_) => "Internal server error",
            Self::DownstreamTimeout { .. } => "Downstream service timeout",
            Self::DownstreamUnreachable { .. } => "Failed to connect to downstream service",
            Self::DownstreamUnexpectedFailure { .. } => "Failed to forward request to downstream",
        }
    }
}

impl From<ProtocolError> for PipelineError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Malformed(msg) => Self::DecodeMalformed(msg),
            ProtocolError::MissingField(field) => Self::DecodeMissingField(field),
            ProtocolError::Encode(e) => Self::Encode(e.to_string()),
        }
    }
}

impl From<DispatchError> for PipelineError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Timeout { url } => Self::DownstreamTimeout { url },
            DispatchError::Unreachable { url, reason } => {
                Self::DownstreamUnreachable { url, reason }
            }
            DispatchError::Unexpected { url, reason } => {
                Self::DownstreamUnexpectedFailure { url, reason }
            }
        }
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
