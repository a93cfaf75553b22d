//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `ai` - Chat-completion providers (OpenAI-compatible HTTP, scripted mock)
//! - `chat` - Chat bot command layer
//! - `http` - REST and WebSocket surface
//! - `lookup` - Geocoding, points of interest and weather over public APIs
//! - `storage` - Session store implementations

pub mod ai;
pub mod chat;
pub mod http;
pub mod lookup;
pub mod storage;
