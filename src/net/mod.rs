//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig.bind_address
//!     → listener.rs (normalize, bind)
//!     → TcpListener handed to the HTTP layer
//!     → connection.rs (write deadline around each accepted stream)
//! ```
//!
//! # Design Decisions
//! - HTTP framing and keep-alive belong to hyper; this layer only owns sockets
//! - Bind failure is fatal at startup; there is no retry

pub mod connection;
pub mod listener;

pub use connection::WriteDeadline;
pub use listener::{bind, normalize_bind_address, ListenerError};
