//! Configuration error types

use std::io;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file
    #[error("failed to read config file '{path}': {source}")]
    IoError {
        /// Path to the file
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to parse the rules JSON
    #[error("invalid JSON in rules file: {0}")]
    RulesParseError(#[from] serde_json::Error),

    /// Rules file has no rules
    #[error("no rules defined in rules file")]
    NoRules,

    /// A rule is missing a required value
    #[error("rule {index} is missing required field '{field}'")]
    MissingRuleField {
        /// Position of the rule (0-based)
        index: usize,
        /// Missing field name
        field: &'static str,
    },

    /// Validation error - invalid value
    #[error("[{section}] has invalid {field}: {message}")]
    InvalidValue {
        /// Config section
        section: &'static str,
        /// Field name
        field: &'static str,
        /// Error message
        message: String,
    },

    /// Environment override could not be applied
    #[error("invalid value for environment variable {var}: {message}")]
    InvalidEnv {
        /// Variable name
        var: &'static str,
        /// Error message
        message: String,
    },
}

impl ConfigError {
    /// Create an IoError
    pub fn io_error(path: impl Into<String>, source: io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Create a MissingRuleField error
    pub fn missing_rule_field(index: usize, field: &'static str) -> Self {
        Self::MissingRuleField { index, field }
    }

    /// Create an InvalidValue error
    pub fn invalid_value(
        section: &'static str,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            section,
            field,
            message: message.into(),
        }
    }

    /// Create an InvalidEnv error
    pub fn invalid_env(var: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidEnv {
            var,
            message: message.into(),
        }
    }
}
