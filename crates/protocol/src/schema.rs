//! Field schema for rule evaluation
//!
//! A static table mapping each Pokemon field name to its kind and an accessor.
//! Routing conditions resolve field names through [`lookup_field`]; a name
//! that is not in the table simply has no descriptor.
//!
//! # Design
//!
//! The table is generated by `field_schema!` so adding a field to `Pokemon`
//! means adding one line here. No reflection, no string-keyed maps.

use crate::Pokemon;

/// Kind of a field, decides how a condition literal is coerced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
}

impl FieldKind {
    /// Lowercase kind name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A borrowed field value read from a Pokemon
///
/// Integers are widened to `i128` so every unsigned field and any signed
/// literal compare without overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    String(&'a str),
    Integer(i128),
    Boolean(bool),
}

impl FieldValue<'_> {
    /// Kind of this value
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::String(_) => FieldKind::String,
            Self::Integer(_) => FieldKind::Integer,
            Self::Boolean(_) => FieldKind::Boolean,
        }
    }
}

/// Schema entry for one field
#[derive(Clone, Copy)]
pub struct FieldDescriptor {
    /// Field name as written in rule conditions
    pub name: &'static str,
    /// Kind used for literal coercion
    pub kind: FieldKind,
    accessor: for<'a> fn(&'a Pokemon) -> FieldValue<'a>,
}

impl FieldDescriptor {
    /// Read this field from a Pokemon
    #[inline]
    pub fn get<'a>(&self, pokemon: &'a Pokemon) -> FieldValue<'a> {
        (self.accessor)(pokemon)
    }
}

impl std::fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

macro_rules! field_value {
    (String, $e:expr) => {
        FieldValue::String($e.as_str())
    };
    (Integer, $e:expr) => {
        FieldValue::Integer(i128::from($e))
    };
    (Boolean, $e:expr) => {
        FieldValue::Boolean($e)
    };
}

macro_rules! field_schema {
    ($($field:ident: $kind:ident),+ $(,)?) => {
        mod accessors {
            use super::{FieldValue, Pokemon};

            $(
                pub(super) fn $field(p: &Pokemon) -> FieldValue<'_> {
                    field_value!($kind, p.$field)
                }
            )+
        }

        /// Every rule-addressable field, in tag order
        pub static FIELDS: &[FieldDescriptor] = &[
            $(
                FieldDescriptor {
                    name: stringify!($field),
                    kind: FieldKind::$kind,
                    accessor: accessors::$field,
                },
            )+
        ];
    };
}

field_schema! {
    number: Integer,
    name: String,
    type_one: String,
    type_two: String,
    total: Integer,
    hit_points: Integer,
    attack: Integer,
    defense: Integer,
    special_attack: Integer,
    special_defense: Integer,
    speed: Integer,
    generation: Integer,
    legendary: Boolean,
}

/// Find the descriptor for a field name
pub fn lookup_field(name: &str) -> Option<&'static FieldDescriptor> {
    FIELDS.iter().find(|d| d.name == name)
}

impl Pokemon {
    /// Read a field by name, `None` if the schema has no such field
    pub fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        lookup_field(name).map(|d| d.get(self))
    }
}
