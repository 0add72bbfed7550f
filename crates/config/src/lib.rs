//! PokeProxy Configuration
//!
//! TOML-based service configuration with sensible defaults, environment
//! overrides, and the JSON routing rules file.
//! Minimal config should just work - only specify what you need to change.
//!
//! # Parsing
//!
//! ```
//! use pokeproxy_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[server]\nport = 9000").unwrap();
//! assert_eq!(config.server.port, 9000);
//! assert_eq!(config.proxy.max_body_size, 4096);
//! ```
//!
//! # Environment Overrides
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `POKEPROXY_CONFIG` | `[proxy] rules_file` |
//! | `POKEPROXY_SECRET` | `[proxy] secret` |
//! | `POKEPROXY_MAX_BODY_SIZE` | `[proxy] max_body_size` |
//!
//! # Example Full Config
//!
//! See `configs/config.toml` for all available options.

mod error;
mod logging;
mod metrics;
mod proxy;
mod rules;
mod server;
mod validation;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use metrics::{MetricsConfig, MetricsFormat};
pub use proxy::{DEFAULT_MAX_BODY_SIZE, DEFAULT_RULES_FILE, ProxyConfig, UpstreamConfig};
pub use rules::{RuleConfig, RulesConfig};
pub use server::{DEFAULT_ADDRESS, DEFAULT_PORT, ServerConfig};

use serde::Deserialize;

/// Environment variable overriding the rules file path
pub const ENV_RULES_FILE: &str = "POKEPROXY_CONFIG";

/// Environment variable carrying the base64 secret
pub const ENV_SECRET: &str = "POKEPROXY_SECRET";

/// Environment variable overriding the maximum body size
pub const ENV_MAX_BODY_SIZE: &str = "POKEPROXY_MAX_BODY_SIZE";

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP listener
    pub server: ServerConfig,

    /// Logging configuration
    pub log: LogConfig,

    /// Rules, secret, body limit and downstream client
    pub proxy: ProxyConfig,

    /// Metrics store and reporter
    pub metrics: MetricsConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or contains invalid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::io_error(path.display().to_string(), e))?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// Prefer using the `FromStr` trait implementation.
    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Apply `POKEPROXY_*` environment overrides, then re-validate
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup, then re-validate
    ///
    /// Empty values are treated as unset.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(path) = get(ENV_RULES_FILE) {
            self.proxy.rules_file = PathBuf::from(path);
        }

        if let Some(secret) = get(ENV_SECRET) {
            self.proxy.secret = Some(secret);
        }

        if let Some(size) = get(ENV_MAX_BODY_SIZE) {
            self.proxy.max_body_size = size
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid_env(ENV_MAX_BODY_SIZE, format!("{e}")))?;
        }

        self.validate()
    }

    /// Load the routing rules file named by this configuration
    pub fn load_rules(&self) -> Result<RulesConfig> {
        RulesConfig::from_file(&self.proxy.rules_file)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use std::time::Duration;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.server.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.log.level, LogLevel::Info);
        assert_eq!(config.proxy.max_body_size, 4096);
        assert_eq!(config.metrics.max_destinations, 1000);
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[server]
address = "127.0.0.1"
port = 8080

[log]
level = "debug"
format = "json"

[proxy]
rules_file = "rules.json"
secret = "c2VjcmV0"
max_body_size = 2048

[proxy.upstream]
timeout = "10s"

[metrics]
max_destinations = 10
report = true
interval = "15s"
format = "json"
"#;
        let config = Config::from_str(toml).unwrap();

        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.proxy.rules_file, PathBuf::from("rules.json"));
        assert_eq!(config.proxy.upstream.timeout, Duration::from_secs(10));
        assert_eq!(config.proxy.upstream.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.metrics.format, MetricsFormat::Json);
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_str("invalid { toml");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_zero_body_size_rejected() {
        let err = Config::from_str("[proxy]\nmax_body_size = 0").unwrap_err();
        assert!(err.to_string().contains("max_body_size"));
    }

    #[test]
    fn test_zero_destinations_rejected() {
        let err = Config::from_str("[metrics]\nmax_destinations = 0").unwrap_err();
        assert!(err.to_string().contains("max_destinations"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = Config::from_str("[proxy.upstream]\ntimeout = \"0s\"").unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup(&[
                ("POKEPROXY_CONFIG", "/tmp/rules.json"),
                ("POKEPROXY_SECRET", "c2VjcmV0"),
                ("POKEPROXY_MAX_BODY_SIZE", "8192"),
            ]))
            .unwrap();

        assert_eq!(config.proxy.rules_file, PathBuf::from("/tmp/rules.json"));
        assert_eq!(config.proxy.secret.as_deref(), Some("c2VjcmV0"));
        assert_eq!(config.proxy.max_body_size, 8192);
    }

    #[test]
    fn test_env_empty_values_ignored() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup(&[("POKEPROXY_SECRET", ""), ("POKEPROXY_CONFIG", "  ")]))
            .unwrap();

        assert!(config.proxy.secret.is_none());
        assert_eq!(config.proxy.rules_file, PathBuf::from(DEFAULT_RULES_FILE));
    }

    #[test]
    fn test_env_invalid_body_size() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(lookup(&[("POKEPROXY_MAX_BODY_SIZE", "four")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv { var: "POKEPROXY_MAX_BODY_SIZE", .. }
        ));
    }

    #[test]
    fn test_env_zero_body_size_fails_validation() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(lookup(&[("POKEPROXY_MAX_BODY_SIZE", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_from_file_and_load_rules() {
        let dir = tempfile::tempdir().unwrap();
        let rules_path = dir.path().join("rules.json");
        std::fs::write(
            &rules_path,
            r#"{"rules": [{"url": "http://a", "reason": "catch-all"}]}"#,
        )
        .unwrap();

        let config_path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "[proxy]\nrules_file = {:?}", rules_path.display().to_string()).unwrap();

        let config = Config::from_file(&config_path).unwrap();
        let rules = config.load_rules().unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.rules[0].reason, "catch-all");
    }

    #[test]
    fn test_from_missing_file() {
        let err = Config::from_file("/nonexistent/pokeproxy.toml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }

    #[test]
    fn test_shipped_configs_parse() {
        let config = Config::from_str(include_str!("../../../configs/config.toml")).unwrap();
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert!(config.proxy.secret.is_none());

        let rules = RulesConfig::from_str(include_str!("../../../configs/rules.json")).unwrap();
        assert_eq!(rules.len(), 4);
        assert!(rules.rules[3].conditions.is_empty());
    }
}
