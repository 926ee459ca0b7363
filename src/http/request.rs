//! Request inspection.
//!
//! # Responsibilities
//! - Extract the transport remote address (set by `ConnectInfo`)
//! - Determine the host the client addressed
//! - Produce the request target (path + query) as sent
//!
//! # Design Decisions
//! - Absent connection info is `None`, not an error: in-process callers
//!   (tests, embedding) may not have a socket

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::{header, uri::PathAndQuery, Extensions, HeaderMap, Uri};

/// Remote socket address recorded by `into_make_service_with_connect_info`.
pub fn remote_addr(extensions: &Extensions) -> Option<SocketAddr> {
    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr)
}

/// Host the client addressed: URI authority (HTTP/2, absolute-form) first,
/// then the `Host` header.
pub fn request_host(uri: &Uri, headers: &HeaderMap) -> String {
    if let Some(authority) = uri.authority() {
        return authority.to_string();
    }

    headers
        .get(header::HOST)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .unwrap_or_default()
}

/// Path and query as requested, `/` when the URI carries neither.
pub fn request_target(uri: &Uri) -> &str {
    uri.path_and_query()
        .map(PathAndQuery::as_str)
        .unwrap_or("/")
}
