use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Main configuration structure for the gateway.
///
/// Read once at startup and passed by reference into the components;
/// nothing reads ambient process state after that.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_coap_port")]
    pub coap_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Upstream resolver in `host:port` form.
    #[serde(default = "default_upstream_server")]
    pub server: String,

    /// Seconds to wait for the single upstream round trip.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_coap_port() -> u16 {
    5688
}
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}
fn default_upstream_server() -> String {
    "8.8.8.8:53".to_string()
}
fn default_query_timeout() -> u64 {
    5
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            coap_port: default_coap_port(),
            bind_address: default_bind_address(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            server: default_upstream_server(),
            query_timeout: default_query_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults.
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. coap-gateway.toml in current directory
    /// 3. /etc/coap-gateway/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("coap-gateway.toml").exists() {
            Self::from_file("coap-gateway.toml")?
        } else if std::path::Path::new("/etc/coap-gateway/config.toml").exists() {
            Self::from_file("/etc/coap-gateway/config.toml")?
        } else {
            Self::default()
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.coap_port {
            self.server.coap_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(server) = overrides.upstream_server {
            self.upstream.server = server;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.coap_port == 0 {
            return Err(ConfigError::Validation("CoAP port cannot be 0".to_string()));
        }
        self.upstream_addr()?;
        Ok(())
    }

    /// The upstream resolver as a socket address.
    pub fn upstream_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.upstream.server.parse().map_err(|e| {
            ConfigError::Validation(format!(
                "Invalid upstream server '{}': {}",
                self.upstream.server, e
            ))
        })
    }
}

/// Startup-time overrides collected by the binary: CLI flags and the
/// `LOOKUP_SERVER` environment variable, merged before validation.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub coap_port: Option<u16>,
    pub bind_address: Option<String>,
    pub upstream_server: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
