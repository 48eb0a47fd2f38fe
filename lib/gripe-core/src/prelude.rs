//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits
//! for easy glob importing:
//!
//! ```ignore
//! use gripe_core::prelude::*;
//! ```

pub use crate::{
    FieldError, HasResponseStatus, HasStatusCode, HasStatusDescription, Meta, ResponseStatus,
    ToResponseStatus, WireError, from_wire, to_wire,
};
