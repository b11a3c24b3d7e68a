//! Typed entity mapping

use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::de::DeserializeOwned;

/// Map one payload into a typed entity. Unknown fields are ignored.
pub fn map_entity<T: DeserializeOwned>(value: JsonValue) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::decode(format!("entity mapping failed: {e}")))
}

/// Map a list of payloads, failing on the first bad element
pub fn map_entities<T: DeserializeOwned>(values: Vec<JsonValue>) -> Result<Vec<T>> {
    values.into_iter().map(map_entity).collect()
}
