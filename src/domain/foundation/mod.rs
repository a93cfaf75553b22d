//! Foundation module - Shared domain primitives.
//!
//! Contains the identifiers and validation errors that the trip planning
//! domain is built on.

mod errors;
mod ids;

pub use errors::ValidationError;
pub use ids::SessionKey;
