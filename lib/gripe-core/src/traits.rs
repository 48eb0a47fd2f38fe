//! Capability traits for status-bearing values.
//!
//! A response DTO that carries its [`ResponseStatus`] in a known field can
//! implement [`HasResponseStatus`]; the envelope then reads the status
//! directly instead of searching the serialized shape.

use crate::ResponseStatus;

/// Direct access to a structured status.
pub trait HasResponseStatus {
    /// The structured status carried by this value, if any.
    fn response_status(&self) -> Option<&ResponseStatus>;
}

/// Access to the HTTP status code of a failed call.
pub trait HasStatusCode {
    /// HTTP status code.
    fn status_code(&self) -> u16;
}

/// Access to the HTTP status description of a failed call.
pub trait HasStatusDescription {
    /// HTTP status description, e.g. `"Not Found"`.
    fn status_description(&self) -> &str;
}

/// Conversion into a structured status.
pub trait ToResponseStatus {
    /// Resolves this value into a structured status, if one is available.
    fn to_response_status(&self) -> Option<ResponseStatus>;
}
