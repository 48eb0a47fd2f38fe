//! Structured error envelope for typed HTTP API clients.
//!
//! A failed remote call comes back with three mutually-inconsistent sources
//! of truth: a typed response DTO, the raw response body, and the HTTP status
//! line. [`ServiceError`] reconciles them into one structured view - error
//! code, message, server stack trace, field-level validation errors - and
//! never fails while doing so: malformed or missing error data degrades to
//! empty fields, not to a panic or a nested error.
//!
//! # Example
//!
//! ```
//! use gripe::ServiceError;
//!
//! let error = ServiceError::new(400, "Bad Request")
//!     .with_response_body(r#"{"ResponseStatus":{"ErrorCode":"Invalid","Message":"Bad input"}}"#);
//!
//! assert_eq!(error.error_code(), "Invalid");
//! assert_eq!(error.error_message(), "Bad input");
//! assert!(error.is_client_error());
//! ```

mod dto;
mod envelope;
pub mod prelude;

pub use dto::{ErrorResponse, ResponseDto};
pub use envelope::ServiceError;

// Re-export core types
pub use gripe_core::{
    FieldError, HasResponseStatus, HasStatusCode, HasStatusDescription, Meta, ResponseStatus,
    ToResponseStatus, WireError, from_wire, from_wire_value, to_wire, wire,
};

// Re-export http types for status codes
pub use http::StatusCode;
