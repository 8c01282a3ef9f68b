//! Command-line interface for running the filter host

pub mod server;

pub use server::*;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "logging-filter")]
#[command(about = "HTTP server that logs every request and response body it handles")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(flatten)]
    pub server: ServerArgs,
}
