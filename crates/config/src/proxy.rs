//! Proxy configuration
//!
//! Where the routing rules live, how requests are authenticated and how the
//! downstream HTTP client behaves.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Default rules file location
pub const DEFAULT_RULES_FILE: &str = "configs/rules.json";

/// Default maximum request body size in bytes
pub const DEFAULT_MAX_BODY_SIZE: usize = 4096;

/// Proxy configuration
///
/// ```toml
/// [proxy]
/// rules_file = "configs/rules.json"
/// secret = "c2VjcmV0"
/// max_body_size = 4096
///
/// [proxy.upstream]
/// timeout = "30s"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Path to the JSON routing rules
    /// Default: configs/rules.json
    pub rules_file: PathBuf,

    /// Base64 HMAC secret; usually supplied via `POKEPROXY_SECRET`
    /// Default: none (every request is rejected with 500)
    pub secret: Option<String>,

    /// Maximum accepted request body in bytes
    /// Default: 4096
    pub max_body_size: usize,

    /// Downstream HTTP client settings
    pub upstream: UpstreamConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            rules_file: PathBuf::from(DEFAULT_RULES_FILE),
            secret: None,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            upstream: UpstreamConfig::default(),
        }
    }
}

/// Downstream HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Overall ceiling for one forwarding attempt
    /// Default: 30s
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// TCP connect timeout
    /// Default: 5s
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,

    /// Idle connections kept per downstream host
    /// Default: 32
    pub pool_max_idle_per_host: usize,

    /// How long an idle connection is kept
    /// Default: 90s
    #[serde(with = "humantime_serde")]
    pub pool_idle_timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            pool_max_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}
