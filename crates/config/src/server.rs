//! HTTP server configuration

use serde::Deserialize;

/// Default bind address
pub const DEFAULT_ADDRESS: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_PORT: u16 = 8000;

/// HTTP server configuration
///
/// ```toml
/// [server]
/// address = "0.0.0.0"
/// port = 8000
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    /// Default: 0.0.0.0
    pub address: String,

    /// Listen port
    /// Default: 8000
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.into(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// `address:port` string to bind to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_address() {
        assert_eq!(ServerConfig::default().bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ServerConfig = toml::from_str("port = 9100").unwrap();
        assert_eq!(config.address, "0.0.0.0");
        assert_eq!(config.bind_address(), "0.0.0.0:9100");
    }
}
