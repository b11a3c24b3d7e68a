//! Status validation and body parsing

use crate::error::{Error, Result};
use crate::http::RawResponse;
use crate::types::{JsonObject, JsonValue};

/// Decode a response body into a JSON object.
///
/// Status 400 and above fail with [`Error::Api`] carrying the raw body. A
/// blank body decodes to an empty object.
pub fn decode_response(response: &RawResponse) -> Result<JsonObject> {
    if response.status >= 400 {
        return Err(Error::api(response.status, response.body.clone()));
    }

    let body = response.body.trim();
    if body.is_empty() {
        return Ok(JsonObject::new());
    }

    match serde_json::from_str::<JsonValue>(body) {
        Ok(JsonValue::Object(map)) => Ok(map),
        Ok(other) => Err(Error::decode(format!(
            "expected a JSON object, got {}",
            kind(&other)
        ))),
        Err(e) => Err(Error::decode(format!("malformed JSON body: {e}"))),
    }
}

/// Require an exact status, e.g. 200 for deletes
pub fn expect_status(response: &RawResponse, expected: u16) -> Result<()> {
    if response.status == expected {
        Ok(())
    } else {
        let body = if response.body.trim().is_empty() {
            "Unknown error".to_string()
        } else {
            response.body.clone()
        };
        Err(Error::api(response.status, body))
    }
}

fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
