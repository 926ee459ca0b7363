//! Client-facing URL reconstruction.

use crate::reflect::flatten::FlatMap;

/// Header set by TLS-terminating proxies with the original scheme.
pub const X_FORWARDED_PROTO: &str = "X-Forwarded-Proto";

/// Rebuild `{scheme}://{host}{request_target}`.
///
/// The scheme is `http` unless `X-Forwarded-Proto` is present, in which case
/// its value is used verbatim.
pub fn reconstruct_url(headers: &FlatMap, host: &str, request_target: &str) -> String {
    let scheme = headers
        .get(X_FORWARDED_PROTO)
        .map(String::as_str)
        .unwrap_or("http");
    format!("{scheme}://{host}{request_target}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scheme() {
        let headers = FlatMap::new();
        assert_eq!(
            reconstruct_url(&headers, "example.com", "/a/b?x=1"),
            "http://example.com/a/b?x=1"
        );
    }

    #[test]
    fn test_forwarded_proto() {
        let mut headers = FlatMap::new();
        headers.insert(X_FORWARDED_PROTO.into(), "https".into());
        assert_eq!(
            reconstruct_url(&headers, "example.com", "/a/b?x=1"),
            "https://example.com/a/b?x=1"
        );
    }

    #[test]
    fn test_forwarded_proto_not_validated() {
        let mut headers = FlatMap::new();
        headers.insert(X_FORWARDED_PROTO.into(), "https,http".into());
        assert_eq!(
            reconstruct_url(&headers, "localhost:8090", "/"),
            "https,http://localhost:8090/"
        );
    }
}
