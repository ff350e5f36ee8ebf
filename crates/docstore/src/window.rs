//! Result-window normalisation.
//!
//! A find whose window asks for exactly one ranked result (`start == end`)
//! returns that document rather than a one-element result envelope.

use serde_json::Value;

use crate::errors::StoreError;
use crate::types::{Response, Window};

/// Unwraps `results[0]` from `body` when `window` is singular.
///
/// Bodies that are not envelopes, or envelopes with no results, are returned
/// unchanged.
pub fn normalize_body(window: Window, body: Value) -> Value {
    if !window.is_singular() {
        return body;
    }
    match body {
        Value::Object(mut envelope) => {
            let first = match envelope.get_mut("results") {
                Some(Value::Array(results)) if !results.is_empty() => Some(results.swap_remove(0)),
                _ => None,
            };
            first.unwrap_or(Value::Object(envelope))
        }
        other => other,
    }
}

/// Applies [`normalize_body`] to a transport outcome. Errors pass through.
pub fn normalize(
    window: Window,
    outcome: Result<Response, StoreError>,
) -> Result<Response, StoreError> {
    outcome.map(|response| Response {
        body: normalize_body(window, response.body),
        headers: response.headers,
    })
}
