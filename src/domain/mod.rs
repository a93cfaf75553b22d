//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (session keys, validation errors)
//! - `trip` - Preferences, trip options, ballots, prompts and AI reply handling

pub mod foundation;
pub mod trip;
