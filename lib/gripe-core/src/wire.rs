//! Structured-text codec seam and wire-shape helpers.
//!
//! The envelope never touches a concrete wire format directly; everything
//! goes through [`to_wire`]/[`from_wire`] and the shape helpers below, so the
//! format stays a single swappable concern (JSON via `serde_json` today).
//!
//! Field names on the wire are well known and looked up ignoring ASCII case.

use derive_more::{Display, Error, From};
use serde_json::{Map, Value};

/// Well-known wire field holding the structured status of a response.
pub const RESPONSE_STATUS: &str = "ResponseStatus";
/// Well-known wire field holding the machine-readable error code.
pub const ERROR_CODE: &str = "ErrorCode";
/// Well-known wire field holding the human-readable message.
pub const MESSAGE: &str = "Message";
/// Well-known wire field holding the server-side stack trace.
pub const STACK_TRACE: &str = "StackTrace";

/// Codec failure.
///
/// Distinguishes "could not parse" from "parsed, but empty" - callers decide
/// how far a failure degrades.
#[derive(Debug, Display, Error, From)]
pub enum WireError {
    /// The value could not be serialized into wire text.
    #[display("serialization error: {_0}")]
    Serialize(serde_json::Error),

    /// The wire text could not be deserialized.
    #[display("deserialization error at '{path}': {message}")]
    #[from(skip)]
    Deserialize {
        /// Path to the failing element (e.g. `"Errors[0].FieldName"`).
        path: String,
        /// Underlying codec message.
        message: String,
    },
}

/// Serialize a value to wire text.
///
/// # Errors
///
/// Returns an error if the value cannot be represented on the wire.
pub fn to_wire<T: serde::Serialize>(value: &T) -> Result<String, WireError> {
    serde_json::to_string(value).map_err(Into::into)
}

/// Deserialize wire text to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so a failure names the exact element that did
/// not fit, the same way request bodies are decoded elsewhere in the stack.
///
/// # Errors
///
/// Returns an error if deserialization fails, with the path to the
/// problematic element.
///
/// # Example
///
/// ```
/// use gripe_core::ResponseStatus;
/// use gripe_core::from_wire;
///
/// let status: ResponseStatus =
///     from_wire(r#"{"ErrorCode":"NotFound","Message":"no such user"}"#).expect("deserialize");
/// assert_eq!(status.error_code, "NotFound");
/// ```
pub fn from_wire<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, WireError> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| WireError::Deserialize {
        path: e.path().to_string(),
        message: e.inner().to_string(),
    })
}

/// Coerce an in-memory wire value to a typed representation.
///
/// # Errors
///
/// Returns an error if the value does not fit the target type, with the path
/// to the problematic element.
pub fn from_wire_value<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, WireError> {
    serde_path_to_error::deserialize(value).map_err(|e| WireError::Deserialize {
        path: e.path().to_string(),
        message: e.inner().to_string(),
    })
}

/// Looks up `key` in a wire map, ignoring ASCII case.
#[must_use]
pub fn get_ignore_case<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v)
}

/// Interprets a wire value as a string-keyed map.
///
/// Accepts a map in place, or text that itself parses into a map (the
/// double-encoded form some servers emit). Anything else is `None`.
#[must_use]
pub fn as_map(value: &Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map.clone()),
        Value::String(text) => match from_wire::<Value>(text) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        },
        _ => None,
    }
}

/// Coerces a wire value to text.
///
/// Scalars take their display form, `null` counts as absent, and maps or
/// arrays keep their wire encoding.
#[must_use]
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
