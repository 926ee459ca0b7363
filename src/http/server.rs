//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the echo handler on every path and method
//! - Wire up middleware (tracing, request logging)
//! - Accept connections and serve each one with the request timeout applied
//!   to header reads and stalled writes
//!
//! # Design Decisions
//! - One hyper connection task per accepted socket; the remote address is
//!   attached to every request as `ConnectInfo`
//! - The body-read deadline lives in the handler so expiry answers 500

use axum::{extract::ConnectInfo, middleware, routing::any, Router};
use hyper::{body::Incoming, service::service_fn, Request};
use hyper_util::rt::{TokioExecutor, TokioIo, TokioTimer};
use hyper_util::server::conn::auto::Builder;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceExt;
use tower_http::trace::TraceLayer;

use crate::config::EchoConfig;
use crate::http::handler::echo_handler;
use crate::http::middleware::log_request;
use crate::net::WriteDeadline;

/// Pause after a failed accept before trying again.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Largest request body the handler will buffer.
    pub max_body_size: usize,

    /// Deadline for receiving the whole request body, if any.
    pub read_timeout: Option<Duration>,
}

/// HTTP server for the echo service.
pub struct HttpServer {
    router: Router,
    config: EchoConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: EchoConfig) -> Self {
        let state = AppState {
            max_body_size: config.limits.max_body_size,
            read_timeout: config.timeouts.request_timeout(),
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(echo_handler))
            .route("/", any(echo_handler))
            .with_state(state)
            .layer(middleware::from_fn(log_request))
            .layer(TraceLayer::new_for_http())
    }

    /// Connection builder for HTTP/1 and HTTP/2, with a header-read deadline
    /// when a timeout is configured.
    fn connection_builder(timeout: Option<Duration>) -> Builder<TokioExecutor> {
        let mut builder = Builder::new(TokioExecutor::new());
        if let Some(limit) = timeout {
            builder
                .http1()
                .timer(TokioTimer::new())
                .header_read_timeout(limit);
        }
        builder
    }

    /// The fully layered router, for serving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Runs until the process exits. Accept errors are logged and retried.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let timeout = self.config.timeouts.request_timeout();
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config.timeouts.request_secs,
            "HTTP server starting"
        );

        let builder = Self::connection_builder(timeout);

        loop {
            let (stream, remote) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to accept connection");
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            };

            let router = self.router.clone();
            let builder = builder.clone();
            tokio::spawn(async move {
                let service = service_fn(move |mut request: Request<Incoming>| {
                    request.extensions_mut().insert(ConnectInfo(remote));
                    router.clone().oneshot(request)
                });

                let io = TokioIo::new(WriteDeadline::new(stream, timeout));
                if let Err(e) = builder.serve_connection(io, service).await {
                    tracing::debug!(error = %e, remote = %remote, "Connection closed with error");
                }
            });
        }
    }
}
