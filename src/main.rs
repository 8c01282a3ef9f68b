//! Main entry point for the logging filter host

use clap::Parser;
use logging_filter::{cli::Cli, cli::ServerArgs, init_logger_with_config, log_info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = cli.server.to_config().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {:#}", e);
        std::process::exit(1);
    });

    init_logger_with_config(&config.log_level, config.logging.enable_file_logging);

    log_info!("🚀 Starting logging filter host");
    log_info!("📋 Version: {}", env!("CARGO_PKG_VERSION"));

    ServerArgs::start_server(config).await
}
