//! Configuration System
//!
//! Layered configuration for the exchange: built-in defaults, the user's global config
//! file or an explicit `--config` file, then `OOMAX_*` environment variables. Command line
//! flags are applied last by the binary.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Default port of the office bridge.
pub const DEFAULT_PORT: u16 = 2002;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Where the office bridge listens
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Office bridge endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Connect and request timeout for each remote call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ConnectionConfig {
    /// URL of the bridge endpoint.
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}/bridge", self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Connection host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("Connection port cannot be 0".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("Connection timeout must be at least one second".to_string());
        }
        Ok(())
    }
}

impl ExchangeConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if let Err(e) = self.connection.validate() {
            errors.push(e);
        }
        if !matches!(self.logging.format.as_str(), "text" | "json") {
            errors.push(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                self.logging.format
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
