//! Sinks for the two per-exchange log lines

use crate::config::LoggingConfig;
use crate::error::{Error, Result};
use crate::models::{RequestLine, ResponseLine};
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Receives the request and response lines of every exchange.
///
/// Implementations must be shareable across concurrently running exchanges.
pub trait ExchangeLog: Send + Sync {
    /// Record the line emitted before the downstream chain runs
    fn log_request(&self, line: &RequestLine<'_>) -> Result<()>;

    /// Record the line emitted after the downstream chain returns
    fn log_response(&self, line: &ResponseLine<'_>) -> Result<()>;
}

/// Default sink: both lines at INFO through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingExchangeLog;

impl ExchangeLog for TracingExchangeLog {
    fn log_request(&self, line: &RequestLine<'_>) -> Result<()> {
        info!("{}", line);
        Ok(())
    }

    fn log_response(&self, line: &ResponseLine<'_>) -> Result<()> {
        info!("{}", line);
        Ok(())
    }
}

/// Writes each line, newline-terminated, to an arbitrary writer
pub struct WriterExchangeLog<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterExchangeLog<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the sink and hand back the writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|_| Error::Logging("log writer lock poisoned".to_string()))
    }

    fn write_line(&self, line: &dyn std::fmt::Display) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| Error::Logging("log writer lock poisoned".to_string()))?;
        writeln!(writer, "{}", line)
            .and_then(|_| writer.flush())
            .map_err(|e| Error::Logging(e.to_string()))
    }
}

impl<W: Write + Send> ExchangeLog for WriterExchangeLog<W> {
    fn log_request(&self, line: &RequestLine<'_>) -> Result<()> {
        self.write_line(line)
    }

    fn log_response(&self, line: &ResponseLine<'_>) -> Result<()> {
        self.write_line(line)
    }
}

/// Pick the exchange sink: an append-only file when configured, tracing otherwise
pub fn exchange_log_from_config(config: &LoggingConfig) -> Result<Arc<dyn ExchangeLog>> {
    match &config.exchange_log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            info!("Writing exchange lines to {}", path.display());
            Ok(Arc::new(WriterExchangeLog::new(file)))
        }
        None => Ok(Arc::new(TracingExchangeLog)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::{Method, StatusCode};
    use std::io;

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_log_appends_lines() {
        let log = WriterExchangeLog::new(Vec::new());
        let method = Method::GET;

        log.log_request(&RequestLine::new(&method, "/health", b"")).unwrap();
        log.log_response(&ResponseLine::new(3, StatusCode::OK, b"OK")).unwrap();

        let written = String::from_utf8(log.into_inner().unwrap()).unwrap();
        assert_eq!(
            written,
            "Incoming Req -> [GET] /health - Body: \nOutgoing Res (3ms) -> [200] - Body: OK\n"
        );
    }

    #[test]
    fn test_writer_failure_is_logging_error() {
        let log = WriterExchangeLog::new(BrokenWriter);
        let result = log.log_response(&ResponseLine::new(0, StatusCode::OK, b""));
        assert!(matches!(result, Err(Error::Logging(_))));
    }

    #[test]
    fn test_config_file_sink_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exchanges.log");
        std::fs::write(&path, "earlier\n").unwrap();
        let config = LoggingConfig {
            exchange_log_file: Some(path.clone()),
            ..Default::default()
        };

        let log = exchange_log_from_config(&config).unwrap();
        log.log_response(&ResponseLine::new(5, StatusCode::OK, b"OK")).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "earlier\nOutgoing Res (5ms) -> [200] - Body: OK\n");
    }

    #[test]
    fn test_tracing_log_never_fails() {
        let method = Method::DELETE;
        let log = TracingExchangeLog;
        assert!(log.log_request(&RequestLine::new(&method, "/x", b"")).is_ok());
        assert!(log.log_response(&ResponseLine::new(1, StatusCode::NO_CONTENT, b"")).is_ok());
    }
}
