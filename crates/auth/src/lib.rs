//! PokeProxy - Authentication
//!
//! Shared-secret request signing for the ingestion endpoint.
//!
//! # Overview
//!
//! Every request to `/stream` carries an `X-Grd-Signature` header:
//! ```text
//! X-Grd-Signature: hex(HMAC-SHA256(secret, raw_body))
//! ```
//! - The secret is configured base64-encoded and decoded once at startup
//! - The signature is lowercase hex, 64 characters
//! - Comparison is constant-time
//!
//! # Example
//!
//! ```
//! use pokeproxy_auth::{Secret, SignatureVerifier};
//!
//! let secret = Secret::from_base64("c2VjcmV0").unwrap();
//! let verifier = SignatureVerifier::new(&secret).unwrap();
//!
//! let signature = verifier.sign(b"payload");
//! assert!(verifier.verify(b"payload", &signature));
//! assert!(!verifier.verify(b"tampered", &signature));
//! ```

mod error;
mod secret;
mod signature;


pub use error::{AuthError, Result};
pub use secret::Secret;
pub use signature::SignatureVerifier;

/// Header carrying the request signature
pub const SIGNATURE_HEADER: &str = "x-grd-signature";

/// Length of a signature in hex characters
pub const SIGNATURE_HEX_LENGTH: usize = 64;
