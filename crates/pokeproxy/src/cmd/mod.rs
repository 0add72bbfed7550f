//! Command implementations for the PokeProxy CLI

pub mod send;
pub mod serve;
