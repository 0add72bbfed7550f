//! PokeProxy Protocol - Wire formats for the ingestion proxy
//!
//! This crate owns the entity that flows through the proxy:
//! - `Pokemon` - The record decoded from the signed protobuf body
//! - `decode()` - Protobuf parsing with required-field validation
//! - `encode_json()` - The JSON payload forwarded to downstream services
//! - `FieldValue` / `FIELDS` - Compile-time field schema used by routing rules
//!
//! # Wire Formats
//!
//! Inbound bodies are protobuf-encoded `Pokemon` messages. Outbound payloads
//! use the protobuf JSON mapping with original (snake_case) field names and
//! every field present, even when it holds its default value.
//!
//! # Example
//!
//! ```
//! use pokeproxy_protocol::{Pokemon, decode, encode_json};
//! use prost::Message;
//!
//! let pokemon = Pokemon { name: "Pikachu".into(), number: 25, ..Default::default() };
//! let body = pokemon.encode_to_vec();
//!
//! let decoded = decode(&body).unwrap();
//! assert_eq!(decoded.name, "Pikachu");
//!
//! let json = encode_json(&decoded).unwrap();
//! assert!(json.starts_with(br#"{"number":"25""#));
//! ```

mod decode;
mod encode;
mod error;
mod pokemon;
mod schema;

pub use decode::decode;
pub use encode::{encode_json, encode_protobuf, to_json_value};
pub use error::ProtocolError;
pub use pokemon::Pokemon;
pub use schema::{FIELDS, FieldDescriptor, FieldKind, FieldValue, lookup_field};

// Re-export bytes for convenience
pub use bytes::Bytes;

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Content type of the inbound protobuf body
pub const PROTOBUF_CONTENT_TYPE: &str = "application/octet-stream";

/// Content type of the outbound JSON payload
pub const JSON_CONTENT_TYPE: &str = "application/json";
