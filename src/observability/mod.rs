//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! http/middleware/logging.rs (one "handled request" event per request)
//! tower_http::trace          (per-request span, debug level)
//! handler errors             (error events)
//!     → logging.rs subscriber (stdout, pretty or JSON)
//! ```

pub mod logging;

pub use logging::{init_logging, LoggingError};
