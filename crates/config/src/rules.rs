//! Routing rules file
//!
//! Rules live in a JSON file next to the service configuration:
//!
//! ```json
//! {
//!   "rules": [
//!     { "url": "http://downstream/legendary", "reason": "Legendary Pokemon", "match": ["legendary==true"] },
//!     { "url": "http://downstream/default", "reason": "Default route" }
//!   ]
//! }
//! ```
//!
//! Condition strings are kept verbatim here; they are compiled by the routing
//! crate.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// One routing rule as written in the rules file
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RuleConfig {
    /// Destination URL
    pub url: String,

    /// Reason forwarded as `X-Grd-Reason`
    pub reason: String,

    /// Conditions, all of which must hold
    /// Default: [] (catch-all)
    #[serde(rename = "match", default)]
    pub conditions: Vec<String>,
}

/// Parsed rules file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulesConfig {
    /// Rules in evaluation order
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl RulesConfig {
    /// Load rules from a JSON file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, is not valid JSON, has no
    /// rules, or a rule has an empty url or reason.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::io_error(path.display().to_string(), e))?;

        Self::from_str(&contents)
    }

    fn parse(s: &str) -> Result<Self> {
        let config: RulesConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            return Err(ConfigError::NoRules);
        }

        for (index, rule) in self.rules.iter().enumerate() {
            if rule.url.trim().is_empty() {
                return Err(ConfigError::missing_rule_field(index, "url"));
            }
            if rule.reason.is_empty() {
                return Err(ConfigError::missing_rule_field(index, "reason"));
            }
        }

        Ok(())
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
}

impl FromStr for RulesConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
