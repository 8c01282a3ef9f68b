//! hyper host that runs every inbound request through the logging filter

use crate::error::Result;
use crate::filter::{FilterChain, LoggingFilter, OutgoingResponse};
use crate::utils::build_error_response;
use crate::{log_debug, log_info};
use hyper::server::conn::{AddrIncoming, AddrStream};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server, StatusCode};
use std::convert::Infallible;
use std::fmt::Display;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

pub struct FilterServer<C> {
    listen_addr: SocketAddr,
    filter: LoggingFilter,
    chain: Arc<C>,
}

impl<C> FilterServer<C>
where
    C: FilterChain + 'static,
    C::Error: Display,
{
    pub fn new(listen_addr: SocketAddr, filter: LoggingFilter, chain: C) -> Self {
        Self {
            listen_addr,
            filter,
            chain: Arc::new(chain),
        }
    }

    /// Bind the configured address and serve until the process is interrupted
    pub async fn start(self) -> Result<()> {
        let listener = TcpListener::bind(self.listen_addr).await?;
        self.serve(listener, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await
    }

    /// Serve connections from `listener` until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let local_addr = listener.local_addr()?;
        info!("Logging filter listening on {}", local_addr);

        let filter = self.filter;
        let chain = self.chain;
        let make_svc = make_service_fn(move |conn: &AddrStream| {
            let remote_addr = conn.remote_addr();
            let filter = filter.clone();
            let chain = Arc::clone(&chain);
            log_debug!("New connection from: {}", remote_addr);

            async move {
                Ok::<_, Infallible>(service_fn(move |req| {
                    let filter = filter.clone();
                    let chain = Arc::clone(&chain);
                    async move { handle_request(req, remote_addr, &filter, chain.as_ref()).await }
                }))
            }
        });

        Server::builder(AddrIncoming::from_listener(listener)?)
            .serve(make_svc)
            .with_graceful_shutdown(shutdown)
            .await?;

        log_info!("Logging filter on {} shut down", local_addr);
        Ok(())
    }
}

/// Run one request through the filter and turn the outcome into a response.
///
/// A chain error is reported here, by the host, as a bare 500.
pub async fn handle_request<C>(
    req: Request<Body>,
    remote_addr: SocketAddr,
    filter: &LoggingFilter,
    chain: &C,
) -> std::result::Result<Response<Body>, Infallible>
where
    C: FilterChain + ?Sized,
    C::Error: Display,
{
    let method = req.method().clone();
    let uri = req.uri().clone();
    let mut sink = OutgoingResponse::new();

    match filter.handle(req, &mut sink, chain).await {
        Ok(()) => Ok(sink.into_response()),
        Err(e) => {
            error!("{} {} from {} failed: {}", method, uri, remote_addr.ip(), e);
            Ok(build_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            ))
        }
    }
}
