//! Request/response body logging filter
//!
//! The filter sits between the transport and the rest of the application. For each
//! exchange it drains the request body, logs it, runs the downstream chain against a
//! buffered request and a buffered response, logs the response, and finally copies
//! the buffered response to the real output sink.

pub mod request;
pub mod response;

pub use request::CapturedRequest;
pub use response::{CapturedResponse, OutgoingResponse, ResponseSink};

use crate::error::{Error, Result};
use crate::logging::{ExchangeLog, TracingExchangeLog};
use crate::models::{RequestLine, ResponseLine};
use crate::utils::elapsed_ms;
use async_trait::async_trait;
use hyper::{Body, Request};
use std::sync::Arc;
use std::time::Instant;

/// The rest of the processing chain behind the filter.
///
/// Errors returned by the chain reach the filter's caller untouched. Failures the
/// filter itself runs into are converted through `From<Error>`.
#[async_trait]
pub trait FilterChain: Send + Sync {
    type Error: From<Error> + Send;

    async fn do_filter(
        &self,
        request: &CapturedRequest,
        response: &mut CapturedResponse,
    ) -> std::result::Result<(), Self::Error>;
}

/// Logs both sides of an exchange around a single downstream call
#[derive(Clone)]
pub struct LoggingFilter {
    log: Arc<dyn ExchangeLog>,
}

impl Default for LoggingFilter {
    fn default() -> Self {
        Self::new(Arc::new(TracingExchangeLog))
    }
}

impl LoggingFilter {
    pub fn new(log: Arc<dyn ExchangeLog>) -> Self {
        Self { log }
    }

    /// Run one exchange through the filter.
    ///
    /// The response reaches `sink` only if the chain succeeds. Once it has, the copy to
    /// `sink` happens even when writing the response line fails; a failed copy takes
    /// precedence over a failed log write.
    pub async fn handle<C, S>(
        &self,
        request: Request<Body>,
        sink: &mut S,
        chain: &C,
    ) -> std::result::Result<(), C::Error>
    where
        C: FilterChain + ?Sized,
        S: ResponseSink + Send + ?Sized,
    {
        let start = Instant::now();
        let request = CapturedRequest::capture(request).await?;
        let mut response = CapturedResponse::new();

        self.log_request(&request)?;
        chain.do_filter(&request, &mut response).await?;
        self.log_response(&mut response, start, sink)?;

        Ok(())
    }

    fn log_request(&self, request: &CapturedRequest) -> Result<()> {
        let line = RequestLine::new(request.method(), request.path(), request.cached_body());
        self.log.log_request(&line)
    }

    fn log_response<S>(&self, response: &mut CapturedResponse, start: Instant, sink: &mut S) -> Result<()>
    where
        S: ResponseSink + ?Sized,
    {
        let logged = self.log.log_response(&ResponseLine::new(
            elapsed_ms(start),
            response.status(),
            response.content_as_bytes(),
        ));

        response.copy_body_to_response(sink)?;
        logged
    }
}
