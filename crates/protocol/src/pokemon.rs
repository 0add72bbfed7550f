//! The Pokemon record
//!
//! Protobuf schema:
//! ```text
//! message Pokemon {
//!     uint64 number = 1;
//!     string name = 2;
//!     string type_one = 3;
//!     string type_two = 4;
//!     uint32 total = 5;
//!     uint32 hit_points = 6;
//!     uint32 attack = 7;
//!     uint32 defense = 8;
//!     uint32 special_attack = 9;
//!     uint32 special_defense = 10;
//!     uint32 speed = 11;
//!     uint32 generation = 12;
//!     bool legendary = 13;
//! }
//! ```

/// A decoded Pokemon
///
/// proto3 semantics: absent fields decode to their default value, so `name`
/// is validated separately by [`crate::decode`].
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Pokemon {
    #[prost(uint64, tag = "1")]
    pub number: u64,

    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,

    #[prost(string, tag = "3")]
    pub type_one: ::prost::alloc::string::String,

    #[prost(string, tag = "4")]
    pub type_two: ::prost::alloc::string::String,

    #[prost(uint32, tag = "5")]
    pub total: u32,

    #[prost(uint32, tag = "6")]
    pub hit_points: u32,

    #[prost(uint32, tag = "7")]
    pub attack: u32,

    #[prost(uint32, tag = "8")]
    pub defense: u32,

    #[prost(uint32, tag = "9")]
    pub special_attack: u32,

    #[prost(uint32, tag = "10")]
    pub special_defense: u32,

    #[prost(uint32, tag = "11")]
    pub speed: u32,

    #[prost(uint32, tag = "12")]
    pub generation: u32,

    #[prost(bool, tag = "13")]
    pub legendary: bool,
}

impl Pokemon {
    /// Display label used in logs, e.g. `Pikachu (#25)`
    pub fn label(&self) -> String {
        format!("{} (#{})", self.name, self.number)
    }
}
