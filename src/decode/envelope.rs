//! Envelope extraction

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};

/// Remove the single-entity payload under `key`.
///
/// Returns `None` when the key is absent or null; callers decide whether that
/// means not-found or a malformed response.
pub fn take_single(map: &mut JsonObject, key: &str) -> Option<JsonValue> {
    match map.remove(key) {
        None | Some(JsonValue::Null) => None,
        Some(value) => Some(value),
    }
}

/// Remove the list payload under `key`. Absent or null means empty.
pub fn take_list(map: &mut JsonObject, key: &str) -> Result<Vec<JsonValue>> {
    match map.remove(key) {
        None | Some(JsonValue::Null) => Ok(Vec::new()),
        Some(JsonValue::Array(items)) => Ok(items),
        Some(_) => Err(Error::decode(format!("expected \"{key}\" to be an array"))),
    }
}
