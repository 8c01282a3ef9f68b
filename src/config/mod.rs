//! Configuration for the filter host

pub mod settings;

pub use settings::{FilterConfig, LoggingConfig, DEFAULT_CONFIG_PATH};
