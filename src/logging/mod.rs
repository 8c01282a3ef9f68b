pub mod exchange;

pub use exchange::{exchange_log_from_config, ExchangeLog, TracingExchangeLog, WriterExchangeLog};

use log::{debug, info};
use std::sync::Once;
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Directory that receives rolling log files when file logging is enabled
pub const LOG_DIR: &str = "logs";

/// Prefix of the rolling log file names
pub const LOG_FILE_PREFIX: &str = "logging-filter.log";

/// Initialize the global logger from the configured level
/// This should be called once at the start of the application
///
/// `level` accepts anything `EnvFilter` understands ("info", "logging_filter=debug", ...).
/// An unparseable level falls back to "info". When `enable_file_logging` is set, every
/// event is also written to a daily rolling file under [`LOG_DIR`].
pub fn init_logger_with_config(level: &str, enable_file_logging: bool) {
    INIT.call_once(|| {
        // Bridge log events to tracing before the subscriber goes global
        if let Err(e) = LogTracer::init() {
            eprintln!("Warning: Failed to initialize LogTracer: {:?}", e);
        }

        let filter = EnvFilter::try_new(level).unwrap_or_else(|e| {
            eprintln!("Warning: Invalid log level '{}': {}", level, e);
            EnvFilter::new("info")
        });

        let console_layer = fmt::layer()
            .with_target(false)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_level(true)
            .with_ansi(true);

        let file_layer = enable_file_logging.then(|| {
            fmt::layer()
                .with_writer(tracing_appender::rolling::daily(LOG_DIR, LOG_FILE_PREFIX))
                .with_ansi(false)
        });

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .with(file_layer);

        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Warning: Failed to set tracing subscriber: {:?}", e);
        }
    });
}

/// Log an info message
pub fn log_info(message: &str) {
    info!("{}", message);
}

/// Log a debug message
pub fn log_debug(message: &str) {
    debug!("{}", message);
}

/// Convenience macro for logging info messages
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logging::log_info(&format!($($arg)*));
    };
}

/// Convenience macro for logging debug messages
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logging::log_debug(&format!($($arg)*));
    };
}
