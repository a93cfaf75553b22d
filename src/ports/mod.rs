//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Chat-completion API used for recommendations and itineraries
//! - `SessionStore` - Session-scoped storage with per-session locking
//! - `PlaceLookup` - Geocoding, points of interest and weather services

mod ai_provider;
mod place_lookup;
mod session_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, ResponseFormat, TokenUsage,
};
pub use place_lookup::{Coordinates, LookupError, PlaceLookup};
pub use session_store::{SessionGuard, SessionStore, StoreError};
