//! HTTP echo server library.
//!
//! Every request, whatever its method or path, is answered with a JSON
//! document describing it: headers, query parameters, body, parsed JSON
//! payload, client origin and the reconstructed URL.

pub mod cli;
pub mod config;
pub mod http;
pub mod net;
pub mod observability;
pub mod reflect;

pub use config::schema::EchoConfig;
pub use http::HttpServer;
pub use reflect::EchoResponse;

/// Version printed by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
