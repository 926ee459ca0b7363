//! Request body decoding.

use serde::Deserialize;
use serde_json::Value;

/// Deepest array/object nesting accepted as a JSON document.
pub const MAX_JSON_DEPTH: usize = 10_000;

/// Nesting the default thread stack handles without help.
pub const INLINE_DEPTH: usize = 128;

/// Body as text. Invalid UTF-8 sequences become U+FFFD.
pub fn body_text(body: &[u8]) -> String {
    String::from_utf8_lossy(body).into_owned()
}

/// Parse the body as a JSON document, if it is one.
///
/// Empty and whitespace-only bodies are not JSON, and neither is anything
/// nested deeper than [`MAX_JSON_DEPTH`]. Repeated object keys keep the last
/// value.
pub fn sniff_json(body: &[u8]) -> Option<Value> {
    if nesting_depth(body) > MAX_JSON_DEPTH {
        return None;
    }

    let mut de = serde_json::Deserializer::from_slice(body);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de)).ok()?;
    de.end().ok()?;
    Some(value)
}

/// Deepest `[`/`{` nesting in `body`, ignoring brackets inside strings.
///
/// Exact for well-formed JSON and an upper bound for anything else.
pub fn nesting_depth(body: &[u8]) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0;
    let mut in_string = false;
    let mut escaped = false;

    for &byte in body {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}
