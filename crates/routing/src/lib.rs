//! PokeProxy - Routing
//!
//! Declarative first-match routing of decoded Pokemon to a destination URL.
//!
//! # Design
//!
//! Rules are compiled once when the rule set is built: every condition string
//! is parsed and its literal coerced to the kind of the field it names. The
//! per-request path only walks the rule list and compares values, it never
//! runs a regex or parses a number.
//!
//! - Rules are tried in declaration order, the first full match wins
//! - Conditions within a rule are AND-ed
//! - A rule with no conditions is a catch-all
//! - A condition that cannot be parsed, or names an unknown field, is false
//!
//! # Example
//!
//! ```
//! use pokeproxy_routing::RuleSet;
//! use pokeproxy_protocol::Pokemon;
//!
//! let rules = RuleSet::builder()
//!     .rule("http://legendary", "legendary pokemon", ["legendary==true"])
//!     .rule("http://default", "catch-all", Vec::<String>::new())
//!     .build()
//!     .unwrap();
//!
//! let mewtwo = Pokemon { name: "Mewtwo".into(), legendary: true, ..Default::default() };
//! assert_eq!(rules.find_match(&mewtwo).unwrap().url(), "http://legendary");
//! ```

mod condition;
mod error;
mod rule;


pub use condition::{Condition, Operator};
pub use error::{Result, RoutingError};
pub use rule::{Rule, RuleSet, RuleSetBuilder};

// Re-export the entity for convenience
pub use pokeproxy_protocol::Pokemon;
