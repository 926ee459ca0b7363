//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (net::listener, net::connection write deadline)
//!     → server.rs (accept loop, hyper connection, Axum middleware stack)
//!     → middleware/logging.rs (timing + "handled request" event)
//!     → handler.rs (reflect request, read body)
//!     → error.rs (500 text/plain on body failure)
//!     → Send to client, then the logging guard fires
//! ```

pub mod error;
pub mod handler;
pub mod middleware;
pub mod request;
pub mod server;

pub use error::EchoError;
pub use server::{AppState, HttpServer};
