//! Core types for gripe structured service errors.
//!
//! This crate provides the building blocks used by `gripe`:
//! - [`ResponseStatus`] and [`FieldError`] - the structured status reported by a failed call
//! - [`Meta`] - string metadata that keeps insertion order
//! - [`HasResponseStatus`], [`HasStatusCode`], [`HasStatusDescription`],
//!   [`ToResponseStatus`] - capability traits for status-bearing values
//! - [`wire`] - the structured-text codec seam and wire-shape helpers

mod meta;
pub mod prelude;
mod status;
mod traits;
pub mod wire;

pub use meta::Meta;
pub use status::{FieldError, ResponseStatus};
pub use traits::{HasResponseStatus, HasStatusCode, HasStatusDescription, ToResponseStatus};
pub use wire::{WireError, from_wire, from_wire_value, to_wire};
