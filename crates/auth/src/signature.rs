//! HMAC-SHA256 signature verification
//!
//! # Security
//!
//! The expected signature is compared with the presented one in constant time
//! to prevent timing attacks. Presented signatures are matched byte for byte
//! against the lowercase hex digest; uppercase hex is rejected.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::{AuthError, Result};
use crate::secret::Secret;

type HmacSha256 = Hmac<Sha256>;

/// Verifies and produces request body signatures
///
/// Holds a keyed MAC that is cloned per request, so the key schedule runs
/// once at startup.
#[derive(Clone)]
pub struct SignatureVerifier {
    mac: HmacSha256,
}

impl SignatureVerifier {
    /// Create a verifier for the given secret
    ///
    /// # Errors
    ///
    /// `AuthError::InvalidKey` if the MAC rejects the key.
    pub fn new(secret: &Secret) -> Result<Self> {
        let mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
            .map_err(|e| AuthError::InvalidKey(e.to_string()))?;
        Ok(Self { mac })
    }

    /// Compute the lowercase hex signature of a body
    pub fn sign(&self, body: &[u8]) -> String {
        let mut mac = self.mac.clone();
        mac.update(body);
        hex::encode(mac.finalize().into_bytes())
    }

    /// Check a presented signature against the body
    ///
    /// Returns `false` for any mismatch, including wrong length, non-hex
    /// characters and uppercase hex.
    pub fn verify(&self, body: &[u8], presented: &str) -> bool {
        let expected = self.sign(body);
        bool::from(expected.as_bytes().ct_eq(presented.as_bytes()))
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("key", &"[REDACTED]")
            .finish()
    }
}
