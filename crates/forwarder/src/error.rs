//! Forwarder error types

use thiserror::Error;

/// Failure reported by a transport
///
/// Transports map their native errors onto these three kinds; the
/// dispatcher never inspects anything else.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request did not complete in time
    #[error("timed out: {0}")]
    Timeout(String),

    /// The destination could not be reached or the exchange broke off
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other failure
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Create a Timeout error
    #[inline]
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create a Connect error
    #[inline]
    pub fn connect(msg: impl Into<String>) -> Self {
        Self::Connect(msg.into())
    }

    /// Create an Other error
    #[inline]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Classified dispatch failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// Destination did not answer in time (504)
    #[error("timeout forwarding to {url}")]
    Timeout {
        /// Destination URL
        url: String,
    },

    /// Destination could not be reached (502)
    #[error("connection error to {url}: {reason}")]
    Unreachable {
        /// Destination URL
        url: String,
        /// Underlying cause
        reason: String,
    },

    /// Anything else went wrong (502)
    #[error("unexpected error forwarding to {url}: {reason}")]
    Unexpected {
        /// Destination URL
        url: String,
        /// Underlying cause
        reason: String,
    },
}

impl DispatchError {
    /// Classify a transport failure for a destination
    pub fn from_transport(url: impl Into<String>, err: TransportError) -> Self {
        let url = url.into();
        match err {
            TransportError::Timeout(_) => Self::Timeout { url },
            TransportError::Connect(reason) => Self::Unreachable { url, reason },
            TransportError::Other(reason) => Self::Unexpected { url, reason },
        }
    }

    /// Create an Unexpected error
    #[inline]
    pub fn unexpected(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unexpected {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Destination the failure happened on
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url } | Self::Unreachable { url, .. } | Self::Unexpected { url, .. } => {
                url
            }
        }
    }

    /// Check if this is a timeout
    #[inline]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let url = "http://downstream";
        assert!(matches!(
            DispatchError::from_transport(url, TransportError::timeout("read")),
            DispatchError::Timeout { .. }
        ));
        assert!(matches!(
            DispatchError::from_transport(url, TransportError::connect("refused")),
            DispatchError::Unreachable { .. }
        ));
        assert!(matches!(
            DispatchError::from_transport(url, TransportError::other("boom")),
            DispatchError::Unexpected { .. }
        ));
    }

    #[test]
    fn test_url_and_display() {
        let err = DispatchError::from_transport("http://a", TransportError::connect("refused"));
        assert_eq!(err.url(), "http://a");
        assert_eq!(err.to_string(), "connection error to http://a: refused");
        assert!(!err.is_timeout());

        let err = DispatchError::from_transport("http://b", TransportError::timeout("30s"));
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "timeout forwarding to http://b");
    }
}
