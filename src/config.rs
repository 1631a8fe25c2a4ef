//! Server configuration.
//!
//! Values start from built-in defaults, are optionally replaced by a YAML
//! file named in `COURIER_CONFIG`, and finally by individual environment
//! overrides.

use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4221;
const DEFAULT_STORAGE_ROOT: &str = "/tmp/data/codecrafters.io/http-server-tester";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory that stored files are read from and written to.
    pub root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_STORAGE_ROOT),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Loads configuration using `lookup` to resolve environment variables.
    ///
    /// `COURIER_CONFIG` names an optional YAML file. `COURIER_HOST`,
    /// `COURIER_PORT` and `COURIER_STORAGE_DIR` override individual fields
    /// after the file is applied.
    pub fn load_from<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match lookup("COURIER_CONFIG") {
            Some(path) => {
                let path = PathBuf::from(path);
                let content = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Io { path, source })?;
                Self::from_yaml_str(&content)?
            }
            None => Self::default(),
        };

        if let Some(host) = lookup("COURIER_HOST") {
            cfg.server.host = host;
        }

        if let Some(port) = lookup("COURIER_PORT") {
            cfg.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "COURIER_PORT",
                value: port,
            })?;
        }

        if let Some(root) = lookup("COURIER_STORAGE_DIR") {
            cfg.storage.root = PathBuf::from(root);
        }

        Ok(cfg)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// The `host:port` string the listener binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
