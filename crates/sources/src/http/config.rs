//! HTTP source configuration

use pokeproxy_config::{DEFAULT_ADDRESS, DEFAULT_PORT, ServerConfig};

/// HTTP source configuration
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Bind address (e.g., "0.0.0.0")
    pub address: String,

    /// Listen port
    pub port: u16,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.into(),
            port: DEFAULT_PORT,
        }
    }
}

impl HttpSourceConfig {
    /// Create config with custom port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address to bind to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

impl From<&ServerConfig> for HttpSourceConfig {
    fn from(server: &ServerConfig) -> Self {
        Self {
            address: server.address.clone(),
            port: server.port,
        }
    }
}
