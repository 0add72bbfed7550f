//! JSON encoder for downstream payloads
//!
//! Follows the protobuf JSON mapping with original field names:
//! - every field is printed, including defaults
//! - 64-bit integers are rendered as JSON strings
//! - fields appear in tag order

use prost::Message;
use serde::Serialize;

use crate::{Pokemon, Result};

/// Borrowed JSON view of a Pokemon
#[derive(Serialize)]
struct PokemonJson<'a> {
    number: String,
    name: &'a str,
    type_one: &'a str,
    type_two: &'a str,
    total: u32,
    hit_points: u32,
    attack: u32,
    defense: u32,
    special_attack: u32,
    special_defense: u32,
    speed: u32,
    generation: u32,
    legendary: bool,
}

impl<'a> From<&'a Pokemon> for PokemonJson<'a> {
    fn from(p: &'a Pokemon) -> Self {
        Self {
            number: p.number.to_string(),
            name: &p.name,
            type_one: &p.type_one,
            type_two: &p.type_two,
            total: p.total,
            hit_points: p.hit_points,
            attack: p.attack,
            defense: p.defense,
            special_attack: p.special_attack,
            special_defense: p.special_defense,
            speed: p.speed,
            generation: p.generation,
            legendary: p.legendary,
        }
    }
}

/// Encode a Pokemon as the JSON payload sent downstream
pub fn encode_json(pokemon: &Pokemon) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&PokemonJson::from(pokemon))?)
}

/// Encode a Pokemon as a `serde_json::Value` (same mapping as [`encode_json`])
pub fn to_json_value(pokemon: &Pokemon) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(PokemonJson::from(pokemon))?)
}

/// Encode a Pokemon as the protobuf wire body accepted on `/stream`
pub fn encode_protobuf(pokemon: &Pokemon) -> Vec<u8> {
    pokemon.encode_to_vec()
}
