//! Session Store Port - Interface for session-scoped planning state.
//!
//! Every workflow step reads and writes a whole [`TripSession`]. Writers
//! take the per-session lock first so that concurrent votes or submissions
//! for the same session are applied one after another.

use std::fmt;

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use crate::domain::foundation::SessionKey;
use crate::domain::trip::{TripPlanningError, TripSession};

/// Held while a session is being read-modified-written.
///
/// Dropping the guard unlocks the session first, then runs the store's
/// release hook, if any.
pub struct SessionGuard {
    guard: Option<OwnedMutexGuard<()>>,
    on_release: Option<Box<dyn FnOnce() + Send>>,
}

impl SessionGuard {
    pub fn new(guard: OwnedMutexGuard<()>) -> Self {
        Self {
            guard: Some(guard),
            on_release: None,
        }
    }

    /// Runs `hook` after the lock has been released.
    pub fn on_release(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_release = Some(Box::new(hook));
        self
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        if let Some(hook) = self.on_release.take() {
            hook();
        }
    }
}

impl fmt::Debug for SessionGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionGuard")
            .field("held", &self.guard.is_some())
            .finish()
    }
}

/// Errors that can occur during session storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for TripPlanningError {
    fn from(err: StoreError) -> Self {
        TripPlanningError::Storage(err.to_string())
    }
}

/// Port for storing planning sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Acquire exclusive access to a session.
    ///
    /// Other callers locking the same key wait until the guard is dropped.
    /// Locking an unknown key is allowed; the session may be created while
    /// the guard is held.
    async fn lock(&self, key: &SessionKey) -> SessionGuard;

    /// Load a session, `None` if it was never created.
    async fn get(&self, key: &SessionKey) -> Result<Option<TripSession>, StoreError>;

    /// Insert or replace a session.
    async fn put(&self, key: &SessionKey, session: TripSession) -> Result<(), StoreError>;

    /// Remove a session. Returns `true` if it existed.
    async fn delete(&self, key: &SessionKey) -> Result<bool, StoreError>;
}
