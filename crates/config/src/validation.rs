//! Configuration validation
//!
//! Rejects values that would make the service misbehave at runtime:
//! - zero body size limit (every request would be rejected)
//! - zero metrics capacity
//! - zero forwarding timeout (every dispatch would time out)

use std::time::Duration;

use crate::Config;
use crate::error::{ConfigError, Result};

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.proxy.max_body_size == 0 {
        return Err(ConfigError::invalid_value(
            "proxy",
            "max_body_size",
            "must be greater than 0",
        ));
    }

    if config.metrics.max_destinations == 0 {
        return Err(ConfigError::invalid_value(
            "metrics",
            "max_destinations",
            "must be greater than 0",
        ));
    }

    if config.metrics.report && config.metrics.interval == Duration::ZERO {
        return Err(ConfigError::invalid_value(
            "metrics",
            "interval",
            "must be greater than 0 when report is enabled",
        ));
    }

    if config.proxy.upstream.timeout == Duration::ZERO {
        return Err(ConfigError::invalid_value(
            "proxy.upstream",
            "timeout",
            "must be greater than 0",
        ));
    }

    Ok(())
}
