//! Demo application mounted behind the logging filter

use crate::error::Error;
use crate::filter::{CapturedRequest, CapturedResponse, FilterChain};
use async_trait::async_trait;
use hyper::header::CONTENT_TYPE;
use hyper::{Method, StatusCode};
use std::io;
use tracing::debug;

/// Errors produced by the demo routes
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Filter(#[from] Error),

    #[error("Downstream failure: {0}")]
    Downstream(String),
}

/// `GET /health`, `POST /echo` and `/fail`; everything else is a 404
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoRoutes;

#[async_trait]
impl FilterChain for DemoRoutes {
    type Error = AppError;

    async fn do_filter(
        &self,
        request: &CapturedRequest,
        response: &mut CapturedResponse,
    ) -> Result<(), AppError> {
        debug!("Routing {} {}", request.method(), request.path());

        match (request.method(), request.path()) {
            (&Method::GET, "/health") => {
                response.set_status(StatusCode::OK);
                response.write_body(b"OK");
            }
            (&Method::POST, "/echo") => {
                response.set_status(StatusCode::CREATED);
                if let Some(content_type) = request.headers().get(CONTENT_TYPE) {
                    response
                        .headers_mut()
                        .insert(CONTENT_TYPE, content_type.clone());
                }
                io::copy(&mut request.body_reader(), response).map_err(Error::from)?;
            }
            (_, "/fail") => {
                return Err(AppError::Downstream(format!(
                    "{} /fail always fails",
                    request.method()
                )));
            }
            _ => {
                response.set_status(StatusCode::NOT_FOUND);
                response.write_body(b"Not Found");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::{Body, Request};

    async fn run(method: Method, uri: &str, body: &'static str) -> (CapturedResponse, Result<(), AppError>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let captured = CapturedRequest::capture(request).await.unwrap();
        let mut response = CapturedResponse::new();
        let result = DemoRoutes.do_filter(&captured, &mut response).await;
        (response, result)
    }

    #[tokio::test]
    async fn test_health() {
        let (response, result) = run(Method::GET, "/health", "").await;
        assert!(result.is_ok());
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.content_as_bytes(), b"OK");
    }

    #[tokio::test]
    async fn test_echo_copies_body_and_content_type() {
        let (response, result) = run(Method::POST, "/echo", r#"{"a":1}"#).await;
        assert!(result.is_ok());
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.content_as_bytes(), br#"{"a":1}"#);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    }

    #[tokio::test]
    async fn test_fail_returns_downstream_error() {
        let (_, result) = run(Method::DELETE, "/fail", "").await;
        match result {
            Err(AppError::Downstream(message)) => assert_eq!(message, "DELETE /fail always fails"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (response, result) = run(Method::GET, "/missing", "").await;
        assert!(result.is_ok());
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.content_as_bytes(), b"Not Found");
    }
}
