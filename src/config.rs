//! Configuration management for Itemd
//!
//! Loads settings from TOML file at ~/.itemd/config.toml

use crate::error::{ItemdError, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server port (default: 19480)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Server host (default: 127.0.0.1 - localhost only)
    /// WARNING: Setting to "0.0.0.0" exposes the server to your network.
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    19480 // Uncommon port to avoid conflicts
}

fn default_host() -> String {
    "127.0.0.1".to_string() // Localhost only - secure by default
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let expanded_path = expand_path(path);

        if !expanded_path.exists() {
            return Err(ItemdError::Config(format!(
                "Configuration file not found: {}",
                expanded_path.display()
            )));
        }

        let content = std::fs::read_to_string(&expanded_path)?;
        let config: Config = toml::from_str(&content)?;

        Ok(config)
    }

    /// Load configuration from file or use defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|p| p.join(".itemd").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".itemd/config.toml"))
    }

    /// Get the server socket address
    pub fn server_addr(&self) -> SocketAddr {
        use std::net::ToSocketAddrs;

        format!("{}:{}", self.server.host, self.server.port)
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], self.server.port)))
    }

    /// Apply environment variable overrides (server options only)
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("ITEMD_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("ITEMD_SERVER_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
    }

    /// Create a default configuration file at the given path
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<()> {
        // Write a well-commented config file
        let content = r#"# Itemd Configuration

[server]
# Port to listen on (default: 19480)
port = 19480

# Host to bind to
# "127.0.0.1" = localhost only (secure, recommended)
# "0.0.0.0" = all interfaces (exposes to network)
host = "127.0.0.1"
"#;

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;

        Ok(())
    }
}

/// Expand ~ to home directory in paths
pub fn expand_path(path: &Path) -> PathBuf {
    if path.starts_with("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(path.strip_prefix("~").unwrap());
        }
    }
    path.to_path_buf()
}
