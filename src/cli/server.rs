//! Server management CLI arguments

use crate::app::DemoRoutes;
use crate::config::FilterConfig;
use crate::filter::LoggingFilter;
use crate::logging::exchange_log_from_config;
use crate::server::FilterServer;
use anyhow::{Context, Result};
use clap::Args;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Default, Args)]
pub struct ServerArgs {
    /// YAML configuration file (defaults to ./config.yml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Listening address, overrides the configuration file
    #[arg(long)]
    pub listen_addr: Option<String>,

    /// Log level (trace, debug, info, warn, error), overrides the configuration file
    #[arg(long)]
    pub log_level: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServerArgs {
    /// Merge CLI arguments over the loaded configuration
    pub fn apply_to(&self, mut config: FilterConfig) -> Result<FilterConfig> {
        if let Some(addr) = &self.listen_addr {
            config.listen_addr = addr
                .parse::<SocketAddr>()
                .map_err(|e| anyhow::anyhow!("Invalid listen address '{}': {}", addr, e))?;
        }

        if self.verbose {
            config.log_level = "debug".to_string();
        } else if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }

        Ok(config)
    }

    /// Load the configuration file, then apply CLI overrides
    pub fn to_config(&self) -> Result<FilterConfig> {
        let config = FilterConfig::load_config(self.config.as_deref())?;
        self.apply_to(config)
    }

    /// Start the filter host in front of the demo routes
    pub async fn start_server(config: FilterConfig) -> Result<()> {
        info!("📋 Server Configuration:");
        info!("   Listen address: {}", config.listen_addr);
        info!("   Log level: {}", config.log_level);
        info!(
            "   File logging: {}",
            if config.logging.enable_file_logging { "enabled" } else { "disabled" }
        );

        let exchange_log = exchange_log_from_config(&config.logging)
            .context("Failed to open exchange log")?;
        debug!("Exchange log sink ready");

        let filter = LoggingFilter::new(exchange_log);
        FilterServer::new(config.listen_addr, filter, DemoRoutes)
            .start()
            .await
            .context("Server error")
    }
}
