//! Routing error types

use thiserror::Error;

/// Result type for routing operations
pub type Result<T> = std::result::Result<T, RoutingError>;

/// Errors that can occur while building a rule set
///
/// Condition strings never produce errors: an unparseable condition is kept
/// and evaluates to false.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Rule has an empty destination URL
    #[error("rule {index} has an empty url")]
    EmptyUrl {
        /// Position of the rule (0-based)
        index: usize,
    },

    /// Rule has an empty reason
    #[error("rule {index} has an empty reason")]
    EmptyReason {
        /// Position of the rule (0-based)
        index: usize,
    },

    /// Reason cannot be sent as an HTTP header value
    #[error("rule {index} reason is not a valid header value: {reason:?}")]
    InvalidReason {
        /// Position of the rule (0-based)
        index: usize,
        /// The offending reason
        reason: String,
    },
}

impl RoutingError {
    /// Create an EmptyUrl error
    #[inline]
    pub fn empty_url(index: usize) -> Self {
        Self::EmptyUrl { index }
    }

    /// Create an EmptyReason error
    #[inline]
    pub fn empty_reason(index: usize) -> Self {
        Self::EmptyReason { index }
    }

    /// Create an InvalidReason error
    #[inline]
    pub fn invalid_reason(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidReason {
            index,
            reason: reason.into(),
        }
    }
}
