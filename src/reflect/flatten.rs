//! Header and query-parameter flattening.
//!
//! # Responsibilities
//! - Collapse name → [values] into name → "v1,v2"
//! - Render header names in canonical MIME form
//! - Decode `application/x-www-form-urlencoded` query strings
//!
//! # Design Decisions
//! - Values are joined with `,` (no space) in delivery order
//! - Output is a `BTreeMap`, so names iterate in sorted order

use std::collections::btree_map::{BTreeMap, Entry};

use axum::http::HeaderMap;

/// Single-valued mapping produced by flattening.
pub type FlatMap = BTreeMap<String, String>;

/// Flatten `(name, value)` pairs into a single-valued map.
///
/// Repeated names accumulate their values joined by `,`, preserving the order
/// in which the pairs were yielded.
pub fn flatten<I, K, V>(pairs: I) -> FlatMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    let mut flat = FlatMap::new();
    for (name, value) in pairs {
        match flat.entry(name.into()) {
            Entry::Vacant(slot) => {
                slot.insert(value.as_ref().to_owned());
            }
            Entry::Occupied(mut slot) => {
                let joined = slot.get_mut();
                joined.push(',');
                joined.push_str(value.as_ref());
            }
        }
    }
    flat
}

/// Flatten request headers, keyed by canonical header name.
pub fn flatten_headers(headers: &HeaderMap) -> FlatMap {
    flatten(headers.iter().map(|(name, value)| {
        (
            canonical_header_name(name.as_str()),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        )
    }))
}

/// Flatten a raw query string (without the leading `?`).
pub fn flatten_query(query: Option<&str>) -> FlatMap {
    match query {
        Some(query) => flatten(url::form_urlencoded::parse(query.as_bytes())),
        None => FlatMap::new(),
    }
}

/// Canonical MIME form of a header name: the first letter and every letter
/// following a hyphen are upper case, the rest lower case.
///
/// Names containing bytes outside the token alphabet are returned unchanged.
pub fn canonical_header_name(name: &str) -> String {
    if !name.bytes().all(is_token_byte) {
        return name.to_owned();
    }

    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}
