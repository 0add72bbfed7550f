//! Authentication error types

use thiserror::Error;

/// Result type for auth operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur while loading signing material
///
/// Signature verification itself never fails, it answers yes or no.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Secret is not valid base64
    #[error("invalid base64 secret: {source}")]
    InvalidSecret {
        /// Underlying decode error
        #[source]
        source: base64::DecodeError,
    },

    /// Secret decoded to zero bytes
    #[error("secret is empty")]
    EmptySecret,

    /// MAC key rejected
    #[error("invalid signing key: {0}")]
    InvalidKey(String),
}

impl AuthError {
    /// Create an InvalidSecret error
    #[inline]
    pub fn invalid_secret(source: base64::DecodeError) -> Self {
        Self::InvalidSecret { source }
    }
}
