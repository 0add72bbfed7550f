//! Decoder for signed request bodies
//!
//! Parses the raw protobuf body into a [`Pokemon`] and enforces the one
//! semantic requirement proto3 cannot express: `name` must be present.

use prost::Message;

use crate::{Pokemon, ProtocolError, Result};

/// Decode a protobuf body into a Pokemon
///
/// # Errors
///
/// - `ProtocolError::Malformed` if the bytes are not a valid `Pokemon` message
/// - `ProtocolError::MissingField("name")` if the message has an empty name
pub fn decode(body: &[u8]) -> Result<Pokemon> {
    let pokemon = Pokemon::decode(body)?;

    if pokemon.name.is_empty() {
        return Err(ProtocolError::missing_field("name"));
    }

    Ok(pokemon)
}
