//! Host configuration settings

use crate::error::{Error, Result};
use anyhow::Context;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.yml";

/// Main configuration for the filter host
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Server listening address
    pub listen_addr: SocketAddr,

    /// Log level configuration
    pub log_level: String,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write diagnostics to a daily rolling file under `logs/`
    pub enable_file_logging: bool,

    /// Append the exchange lines to this file instead of the tracing output
    pub exchange_log_file: Option<PathBuf>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            log_level: "info".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl FilterConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_yaml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load configuration with environment variable overrides
    ///
    /// An explicit `path` must exist. Without one, `config.yml` is used when present and
    /// the defaults otherwise.
    pub fn load_config(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_yaml_file(DEFAULT_CONFIG_PATH)?
            }
            None => Self::default(),
        };

        config
            .apply_env_overrides()
            .context("Invalid configuration in environment")?;
        Ok(config)
    }

    /// Apply `FILTER_LISTEN_ADDR`, `RUST_LOG` and `FILTER_ENABLE_FILE_LOGGING`
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("FILTER_LISTEN_ADDR") {
            self.listen_addr = addr
                .parse()
                .map_err(|e| Error::Config(format!("FILTER_LISTEN_ADDR '{}': {}", addr, e)))?;
        }

        if let Some(log_level) = lookup("RUST_LOG") {
            self.log_level = log_level;
        }

        if let Some(enable) = lookup("FILTER_ENABLE_FILE_LOGGING") {
            self.logging.enable_file_logging = enable.to_lowercase() == "true";
        }

        Ok(())
    }
}
