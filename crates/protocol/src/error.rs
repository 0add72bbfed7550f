//! Protocol error types
//!
//! Errors that can occur when decoding or encoding a Pokemon.

use thiserror::Error;

/// Errors that can occur during protocol operations
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Body is not a structurally valid protobuf message
    #[error("malformed protobuf: {0}")]
    Malformed(String),

    /// Message decoded but a required field is empty
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// JSON encoding failed
    #[error("failed to encode JSON: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ProtocolError {
    /// Create a malformed message error
    #[inline]
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Create a missing field error
    #[inline]
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField(field)
    }

    /// Check if this error came from a body that could not be parsed at all
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}

impl From<prost::DecodeError> for ProtocolError {
    fn from(err: prost::DecodeError) -> Self {
        Self::Malformed(err.to_string())
    }
}
