//! Request and response log lines with their exact text rendering

use hyper::{Method, StatusCode};
use std::borrow::Cow;
use std::fmt;

/// Decode a captured body for logging, replacing invalid UTF-8 sequences.
pub fn body_text(body: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(body)
}

// Line emitted before the downstream chain runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine<'a> {
    pub method: &'a Method,
    pub path: &'a str,
    pub body: Cow<'a, str>,
}

// Line emitted after the downstream chain returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseLine<'a> {
    pub elapsed_ms: u64,
    pub status: StatusCode,
    pub body: Cow<'a, str>,
}

impl<'a> RequestLine<'a> {
    pub fn new(method: &'a Method, path: &'a str, body: &'a [u8]) -> Self {
        Self {
            method,
            path,
            body: body_text(body),
        }
    }
}

impl<'a> ResponseLine<'a> {
    pub fn new(elapsed_ms: u64, status: StatusCode, body: &'a [u8]) -> Self {
        Self {
            elapsed_ms,
            status,
            body: body_text(body),
        }
    }
}

impl fmt::Display for RequestLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Incoming Req -> [{}] {} - Body: {}",
            self.method, self.path, self.body
        )
    }
}

impl fmt::Display for ResponseLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Outgoing Res ({}ms) -> [{}] - Body: {}",
            self.elapsed_ms,
            self.status.as_u16(),
            self.body
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_line_format() {
        let method = Method::POST;
        let line = RequestLine::new(&method, "/echo", br#"{"a":1}"#);
        assert_eq!(line.to_string(), r#"Incoming Req -> [POST] /echo - Body: {"a":1}"#);
    }

    #[test]
    fn test_request_line_empty_body() {
        let method = Method::GET;
        let line = RequestLine::new(&method, "/health", b"");
        assert_eq!(line.to_string(), "Incoming Req -> [GET] /health - Body: ");
    }

    #[test]
    fn test_response_line_uses_numeric_status() {
        let line = ResponseLine::new(12, StatusCode::CREATED, b"done");
        assert_eq!(line.to_string(), "Outgoing Res (12ms) -> [201] - Body: done");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let line = ResponseLine::new(0, StatusCode::OK, &[0x66, 0x6f, 0xff, 0x6f]);
        assert_eq!(line.body, "fo\u{FFFD}o");
    }
}
