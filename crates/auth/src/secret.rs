//! Shared signing secret

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{AuthError, Result};

/// Raw HMAC key bytes
///
/// Never printed: `Debug` redacts the key material.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret {
    key: Vec<u8>,
}

impl Secret {
    /// Use raw bytes as the secret
    #[inline]
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }

    /// Decode a base64 (standard alphabet, padded) secret
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidSecret` if the input is not base64, or
    /// `AuthError::EmptySecret` if it decodes to nothing.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let key = STANDARD
            .decode(encoded.trim())
            .map_err(AuthError::invalid_secret)?;

        if key.is_empty() {
            return Err(AuthError::EmptySecret);
        }

        Ok(Self { key })
    }

    /// Encode the secret as base64
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.key)
    }

    /// Key bytes
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secret")
            .field("key", &"[REDACTED]")
            .finish()
    }
}
