//! Metrics configuration
//!
//! Controls the per-destination metrics store and its optional periodic
//! reporter. The store itself is always on; `report` only controls logging.

use serde::Deserialize;
use std::time::Duration;

/// Metrics output format
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MetricsFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON structured output
    Json,
}

/// Metrics configuration
///
/// # Example
///
/// ```toml
/// [metrics]
/// max_destinations = 1000
/// report = true
/// interval = "60s"
/// format = "human"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Maximum number of destinations tracked before LRU eviction
    /// Default: 1000
    pub max_destinations: usize,

    /// Log a snapshot periodically
    /// Default: false
    pub report: bool,

    /// Reporting interval
    /// Default: 60s
    #[serde(with = "humantime_serde")]
    pub interval: Duration,

    /// Output format (human, json)
    /// Default: human
    pub format: MetricsFormat,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            max_destinations: 1000,
            report: false,
            interval: Duration::from_secs(60),
            format: MetricsFormat::Human,
        }
    }
}
