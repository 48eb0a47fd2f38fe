//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits
//! for easy glob importing:
//!
//! ```ignore
//! use gripe::prelude::*;
//! ```

pub use crate::{
    ErrorResponse, FieldError, HasResponseStatus, HasStatusCode, HasStatusDescription, Meta,
    ResponseDto, ResponseStatus, ServiceError, ToResponseStatus,
};
