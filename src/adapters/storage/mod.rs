//! Storage Adapters
//!
//! Implementations of the SessionStore port.
//!
//! ## Available Adapters
//!
//! - **InMemorySessionStore** - Keeps sessions for the lifetime of the process
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemorySessionStore;
//!
//! let store = Arc::new(InMemorySessionStore::new());
//! ```

mod in_memory_session_store;

pub use in_memory_session_store::InMemorySessionStore;
