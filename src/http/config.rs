// HTTP server configuration

use std::net::SocketAddr;
use tracing::warn;

/// HTTP module configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Listen address (default: 0.0.0.0)
    pub listen_addr: String,
    /// Listen port (default: 8000)
    pub listen_port: u16,
    /// Maximum request body size in bytes (default: 262144)
    pub max_body_bytes: usize,
    /// Maximum request head (request line + headers) size in bytes
    pub max_head_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0".to_string(),
            listen_port: 8000,
            max_body_bytes: 262_144,
            max_head_bytes: 8_192,
        }
    }
}

impl HttpConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("HTTP_LISTEN_ADDR") {
            config.listen_addr = addr;
        }
        if let Ok(port) = std::env::var("HTTP_LISTEN_PORT") {
            match port.parse() {
                Ok(parsed) => config.listen_port = parsed,
                Err(_) => {
                    warn!(value = %port, "Invalid HTTP_LISTEN_PORT, using default");
                }
            }
        }

        config
    }

    /// Returns the socket address to bind to
    pub fn bind_addr(&self) -> SocketAddr {
        format!("{}:{}", self.listen_addr, self.listen_port)
            .parse()
            .expect("Invalid bind address")
    }
}
