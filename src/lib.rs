//! Logging Filter - HTTP middleware that logs request and response bodies
//!
//! Every exchange is buffered on both sides so the bodies can be logged and still
//! reach the downstream chain and the client unchanged.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod server;
pub mod utils;

// Re-export commonly used items
pub use config::FilterConfig;
pub use error::{Error, Result};
pub use filter::{CapturedRequest, CapturedResponse, FilterChain, LoggingFilter, OutgoingResponse, ResponseSink};
pub use logging::{init_logger_with_config, ExchangeLog, TracingExchangeLog, WriterExchangeLog};
pub use models::{RequestLine, ResponseLine};
pub use server::FilterServer;
