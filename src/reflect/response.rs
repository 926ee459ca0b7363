//! Echo response document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::reflect::flatten::FlatMap;
use crate::reflect::payload::{nesting_depth, INLINE_DEPTH};

/// Stack reserved per nesting level when encoding a deep document.
const STACK_PER_LEVEL: usize = 8 * 1024;

/// Everything the server observed about one request.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EchoResponse {
    /// Raw request body as text; empty when there is no body.
    pub data: String,

    /// Flattened request headers.
    pub headers: FlatMap,

    /// Parsed body, present only when `data` is a JSON document.
    pub json: Option<Value>,

    /// Request method, verbatim.
    pub method: String,

    /// Resolved client address.
    pub origin: String,

    /// Flattened query parameters.
    pub params: FlatMap,

    /// Reconstructed client-facing URL.
    pub url: String,
}

impl EchoResponse {
    /// Serialize with two-space indentation and a trailing newline.
    ///
    /// `<`, `>` and `&` are written literally. Deeply nested `json` values
    /// are encoded and dropped on a dedicated stack sized to their depth.
    pub fn into_pretty_json(self) -> Result<Vec<u8>, serde_json::Error> {
        let depth = match self.json {
            Some(_) => nesting_depth(self.data.as_bytes()),
            None => 0,
        };
        if depth <= INLINE_DEPTH {
            return self.write_pretty();
        }
        stacker::grow((depth + 1) * STACK_PER_LEVEL, move || self.write_pretty())
    }

    fn write_pretty(self) -> Result<Vec<u8>, serde_json::Error> {
        let mut out = serde_json::to_vec_pretty(&self)?;
        out.push(b'\n');
        Ok(out)
    }
}
