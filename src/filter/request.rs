//! Replayable view over a fully drained request body

use crate::error::Result;
use bytes::buf::Reader;
use bytes::{Buf, Bytes};
use hyper::{Body, HeaderMap, Method, Request, Uri, Version};
use tracing::debug;

/// A request whose body has been read to the end and kept in memory.
///
/// The body is never mutated after capture. Every call to [`body_reader`](Self::body_reader)
/// or [`to_request`](Self::to_request) starts over at offset 0, so any number of readers
/// see the same bytes the client sent.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    method: Method,
    uri: Uri,
    version: Version,
    headers: HeaderMap,
    body: Bytes,
}

impl CapturedRequest {
    /// Drain `request`'s body and keep it alongside the request metadata
    pub async fn capture(request: Request<Body>) -> Result<Self> {
        let (parts, body) = request.into_parts();
        let body = hyper::body::to_bytes(body).await?;
        debug!("Captured request body, size: {} bytes", body.len());

        Ok(Self {
            method: parts.method,
            uri: parts.uri,
            version: parts.version,
            headers: parts.headers,
            body,
        })
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Request path without the query string
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The captured body bytes
    pub fn cached_body(&self) -> &[u8] {
        &self.body
    }

    /// A fresh reader positioned at the start of the body
    pub fn body_reader(&self) -> Reader<Bytes> {
        self.body.clone().reader()
    }

    /// A fresh `hyper` request carrying the same metadata and body
    pub fn to_request(&self) -> Request<Body> {
        let mut request = Request::new(Body::from(self.body.clone()));
        *request.method_mut() = self.method.clone();
        *request.uri_mut() = self.uri.clone();
        *request.version_mut() = self.version;
        *request.headers_mut() = self.headers.clone();
        request
    }
}
