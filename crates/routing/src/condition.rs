//! Match conditions
//!
//! A condition is written as `field<op>value`, e.g. `attack > 100` or
//! `legendary==true`. It is parsed and type-checked against the field schema
//! once, then evaluated many times.

use std::fmt;
use std::sync::LazyLock;

use pokeproxy_protocol::{FieldDescriptor, FieldKind, FieldValue, Pokemon, lookup_field};
use regex::Regex;

/// `field op value`, whitespace allowed around the operator and at both ends
static CONDITION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\w+)\s*(==|!=|>|<)\s*(.+?)\s*$").expect("condition pattern is valid")
});

/// Literals that make a boolean field truthy (compared lowercase)
const TRUTHY: [&str; 3] = ["true", "1", "yes"];

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Lt,
}

impl Operator {
    /// Operator as written in a condition
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "==" => Some(Self::Eq),
            "!=" => Some(Self::Ne),
            ">" => Some(Self::Gt),
            "<" => Some(Self::Lt),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Condition literal coerced to the kind of its field
#[derive(Debug, Clone, PartialEq, Eq)]
enum Literal {
    Boolean(bool),
    Integer(i128),
    /// String literal, or an integer literal that failed to parse
    Text(String),
}

impl Literal {
    fn coerce(kind: FieldKind, raw: &str) -> Self {
        match kind {
            FieldKind::Boolean => {
                let lower = raw.to_lowercase();
                Self::Boolean(TRUTHY.contains(&lower.as_str()))
            }
            FieldKind::Integer => match raw.parse::<i128>() {
                Ok(n) => Self::Integer(n),
                Err(_) => saturate(raw)
                    .map(Self::Integer)
                    .unwrap_or_else(|| Self::Text(raw.to_owned())),
            },
            FieldKind::String => Self::Text(raw.to_owned()),
        }
    }
}

/// Clamp an integer literal too long for `i128` to the bound on its side
fn saturate(raw: &str) -> Option<i128> {
    let (negative, digits) = match raw.as_bytes().first()? {
        b'-' => (true, &raw[1..]),
        b'+' => (false, &raw[1..]),
        _ => (false, raw),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i128::MIN } else { i128::MAX })
}

#[derive(Debug, Clone)]
struct Parsed {
    field: String,
    op: Operator,
    value: String,
    /// `None` when the field is not in the schema
    target: Option<(&'static FieldDescriptor, Literal)>,
}

/// A single compiled match condition
#[derive(Debug, Clone)]
pub struct Condition {
    source: String,
    parsed: Option<Parsed>,
}

impl Condition {
    /// Parse a condition string
    ///
    /// Never fails. A string that does not look like a condition is kept as
    /// an unparseable condition that always evaluates to false.
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let parsed = CONDITION_PATTERN.captures(&source).and_then(|caps| {
            let field = caps.get(1)?.as_str();
            let op = Operator::from_token(caps.get(2)?.as_str())?;
            let value = caps.get(3)?.as_str();

            let target =
                lookup_field(field).map(|desc| (desc, Literal::coerce(desc.kind, value)));

            Some(Parsed {
                field: field.to_owned(),
                op,
                value: value.to_owned(),
                target,
            })
        });

        Self { source, parsed }
    }

    /// The condition as written in configuration
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the string matched the condition grammar
    #[inline]
    pub fn is_parsed(&self) -> bool {
        self.parsed.is_some()
    }

    /// Whether the condition names a field in the schema
    #[inline]
    pub fn is_known_field(&self) -> bool {
        self.parsed.as_ref().is_some_and(|p| p.target.is_some())
    }

    /// Field name, if parsed
    pub fn field(&self) -> Option<&str> {
        self.parsed.as_ref().map(|p| p.field.as_str())
    }

    /// Operator, if parsed
    pub fn operator(&self) -> Option<Operator> {
        self.parsed.as_ref().map(|p| p.op)
    }

    /// Raw literal (trimmed), if parsed
    pub fn value(&self) -> Option<&str> {
        self.parsed.as_ref().map(|p| p.value.as_str())
    }

    /// Evaluate the condition against a Pokemon
    pub fn evaluate(&self, pokemon: &Pokemon) -> bool {
        let Some(Parsed {
            op,
            target: Some((descriptor, literal)),
            ..
        }) = &self.parsed
        else {
            return false;
        };

        compare(descriptor.get(pokemon), *op, literal)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn compare(actual: FieldValue<'_>, op: Operator, literal: &Literal) -> bool {
    match (actual, literal) {
        (FieldValue::Integer(a), Literal::Integer(b)) => match op {
            Operator::Eq => a == *b,
            Operator::Ne => a != *b,
            Operator::Gt => a > *b,
            Operator::Lt => a < *b,
        },
        (FieldValue::Boolean(a), Literal::Boolean(b)) => match op {
            Operator::Eq => a == *b,
            Operator::Ne => a != *b,
            Operator::Gt | Operator::Lt => false,
        },
        (FieldValue::String(a), Literal::Text(b)) => match op {
            Operator::Eq => a == b,
            Operator::Ne => a != b,
            Operator::Gt | Operator::Lt => false,
        },
        // Integer field against a literal that did not parse: never equal,
        // never ordered
        _ => op == Operator::Ne,
    }
}
