//! Client origin resolution.
//!
//! # Precedence (highest first)
//! 1. `Cf-Connecting-Ip` (verbatim)
//! 2. `X-Real-Ip` (verbatim)
//! 3. `X-Forwarded-For` (first comma-separated hop)
//! 4. Transport remote address, port dropped
//!
//! No header is trusted or validated; the caller sees exactly what it claims.

use std::net::SocketAddr;

use crate::reflect::flatten::FlatMap;

pub const CF_CONNECTING_IP: &str = "Cf-Connecting-Ip";
pub const X_REAL_IP: &str = "X-Real-Ip";
pub const X_FORWARDED_FOR: &str = "X-Forwarded-For";

/// Resolve the best-guess client address.
///
/// Returns an empty string when no header is present and the remote address
/// is unknown.
pub fn resolve_origin(headers: &FlatMap, remote_addr: Option<SocketAddr>) -> String {
    if let Some(ip) = headers.get(CF_CONNECTING_IP) {
        return ip.clone();
    }

    if let Some(ip) = headers.get(X_REAL_IP) {
        return ip.clone();
    }

    if let Some(chain) = headers.get(X_FORWARDED_FOR) {
        let first = chain.split(',').next().unwrap_or_default();
        return first.trim().to_owned();
    }

    remote_addr
        .map(|addr| addr.ip().to_string())
        .unwrap_or_default()
}
