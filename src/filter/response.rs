//! Write-through response accumulator and the real output sink it flushes into

use bytes::BytesMut;
use hyper::header::{HeaderValue, CONTENT_LENGTH};
use hyper::{Body, HeaderMap, Response, StatusCode};
use std::io;

/// The transport-facing response that finally receives status, headers and body.
pub trait ResponseSink {
    fn set_status(&mut self, status: StatusCode);

    fn headers_mut(&mut self) -> &mut HeaderMap;

    fn write_body(&mut self, chunk: &[u8]) -> io::Result<()>;
}

/// Collects everything the downstream chain writes until it is copied to a sink.
#[derive(Debug)]
pub struct CapturedResponse {
    status: StatusCode,
    headers: HeaderMap,
    content: BytesMut,
}

impl Default for CapturedResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl CapturedResponse {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            content: BytesMut::new(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Append bytes to the buffered body
    pub fn write_body(&mut self, chunk: &[u8]) {
        self.content.extend_from_slice(chunk);
    }

    /// Everything written so far, without consuming it
    pub fn content_as_bytes(&self) -> &[u8] {
        &self.content
    }

    pub fn content_size(&self) -> usize {
        self.content.len()
    }

    /// Copy status, headers and buffered body to `sink`, leaving the buffer empty.
    ///
    /// `content-length` is filled in from the buffer when the body is non-empty and
    /// the chain did not set one itself.
    pub fn copy_body_to_response<S>(&mut self, sink: &mut S) -> io::Result<()>
    where
        S: ResponseSink + ?Sized,
    {
        let mut headers = std::mem::take(&mut self.headers);
        let content = self.content.split().freeze();

        if !content.is_empty() && !headers.contains_key(CONTENT_LENGTH) {
            headers.insert(CONTENT_LENGTH, HeaderValue::from(content.len()));
        }

        sink.set_status(self.status);
        sink.headers_mut().extend(headers);

        if content.is_empty() {
            return Ok(());
        }
        sink.write_body(&content)
    }
}

impl io::Write for CapturedResponse {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_body(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Owned response the hyper host hands back to the connection once the filter returns
#[derive(Debug)]
pub struct OutgoingResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: BytesMut,
}

impl Default for OutgoingResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl OutgoingResponse {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: BytesMut::new(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_response(self) -> Response<Body> {
        let mut response = Response::new(Body::from(self.body.freeze()));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl ResponseSink for OutgoingResponse {
    fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_body(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.body.extend_from_slice(chunk);
        Ok(())
    }
}
