//! Request reflection subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (headers, uri, remote addr, body)
//!     → flatten.rs (multi-valued headers/params → single-valued maps)
//!     → url.rs (rebuild the client-facing URL)
//!     → origin.rs (best-guess client IP)
//!     → payload.rs (body text + optional parsed JSON)
//!     → response.rs (EchoResponse, pretty JSON)
//! ```
//!
//! # Design Decisions
//! - Every step is a pure function; the HTTP layer owns all I/O
//! - Flattened maps are sorted by name so output is byte-for-byte stable
//! - Header lookups use canonical MIME names (`X-Forwarded-For`)

pub mod flatten;
pub mod origin;
pub mod payload;
pub mod response;
pub mod url;

pub use flatten::{canonical_header_name, flatten, flatten_headers, flatten_query, FlatMap};
pub use origin::resolve_origin;
pub use payload::{body_text, nesting_depth, sniff_json, MAX_JSON_DEPTH};
pub use response::EchoResponse;
pub use self::url::reconstruct_url;
