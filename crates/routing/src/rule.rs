//! Routing rules and the ordered rule set
//!
//! The rule set is built once at startup from configuration and shared
//! read-only across requests.

use pokeproxy_protocol::Pokemon;

use crate::condition::Condition;
use crate::error::{Result, RoutingError};

/// A routing rule: destination, reason and AND-ed conditions
#[derive(Debug, Clone)]
pub struct Rule {
    url: String,
    reason: String,
    conditions: Vec<Condition>,
}

impl Rule {
    /// Create a rule, parsing each condition string
    pub fn new<I, S>(url: impl Into<String>, reason: impl Into<String>, conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            url: url.into(),
            reason: reason.into(),
            conditions: conditions.into_iter().map(Condition::parse).collect(),
        }
    }

    /// Destination URL, also the metrics key
    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Reason forwarded downstream as `X-Grd-Reason`
    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Compiled conditions
    #[inline]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Whether the rule has no conditions
    #[inline]
    pub fn is_catch_all(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Whether every condition holds for the Pokemon
    pub fn matches(&self, pokemon: &Pokemon) -> bool {
        self.conditions.iter().all(|c| c.evaluate(pokemon))
    }
}

/// Ordered list of routing rules
///
/// # Example
///
/// ```
/// use pokeproxy_routing::{Pokemon, RuleSet};
///
/// let rules = RuleSet::builder()
///     .rule("http://strong", "strong attacker", ["attack > 100", "hit_points > 80"])
///     .build()
///     .unwrap();
///
/// let weak = Pokemon { name: "Magikarp".into(), attack: 10, ..Default::default() };
/// assert!(rules.find_match(&weak).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Create an empty rule set (matches nothing)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a validated rule set
    #[inline]
    #[must_use]
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::new()
    }

    /// Find the first rule whose conditions all hold
    ///
    /// Declaration order is the only tie-break.
    pub fn find_match(&self, pokemon: &Pokemon) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(pokemon))
    }

    /// Number of rules
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no rules
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over rules in evaluation order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }
}

/// Builder for constructing rule sets from configuration
///
/// Validates that every rule has a destination and a reason that can be sent
/// as a header value.
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    rules: Vec<Rule>,
}

impl RuleSetBuilder {
    /// Create a new builder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule (chainable)
    #[must_use]
    pub fn rule<I, S>(mut self, url: impl Into<String>, reason: impl Into<String>, conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Rule::new(url, reason, conditions));
        self
    }

    /// Append an already constructed rule
    #[inline]
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Build the rule set
    ///
    /// # Errors
    ///
    /// Returns an error for the first rule with an empty url, an empty
    /// reason, or a reason containing control characters.
    pub fn build(self) -> Result<RuleSet> {
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.url.trim().is_empty() {
                return Err(RoutingError::empty_url(index));
            }
            if rule.reason.is_empty() {
                return Err(RoutingError::empty_reason(index));
            }
            if !is_valid_header_value(&rule.reason) {
                return Err(RoutingError::invalid_reason(index, rule.reason.clone()));
            }
        }

        Ok(RuleSet { rules: self.rules })
    }
}

/// Same byte set HTTP accepts in a header value: tab, visible ASCII, obs-text
fn is_valid_header_value(value: &str) -> bool {
    value
        .bytes()
        .all(|b| b == b'\t' || (b >= 0x20 && b != 0x7f))
}
