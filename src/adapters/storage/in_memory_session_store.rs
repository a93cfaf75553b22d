//! In-Memory Session Store Adapter
//!
//! Keeps planning sessions in a map for the lifetime of the process.
//! Each key gets its own async mutex so that writers to one session never
//! block writers to another. A key's mutex is dropped from the lock table
//! once nobody holds or waits on it.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::SessionKey;
use crate::domain::trip::TripSession;
use crate::ports::{SessionGuard, SessionStore, StoreError};

/// In-memory storage for planning sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionKey, TripSession>>>,
    locks: Arc<StdMutex<LockTable>>,
}

type LockTable = HashMap<SessionKey, Arc<Mutex<()>>>;

fn lock_table(locks: &StdMutex<LockTable>) -> MutexGuard<'_, LockTable> {
    locks.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemorySessionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored sessions (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    /// Get the number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Number of keys with a live lock entry
    pub fn lock_count(&self) -> usize {
        lock_table(&self.locks).len()
    }

    fn mutex_for(&self, key: &SessionKey) -> Arc<Mutex<()>> {
        Arc::clone(lock_table(&self.locks).entry(key.clone()).or_default())
    }
}

/// Removes `key` from the table unless another caller still holds a
/// reference to its mutex. Runs after the guard has been released.
fn release(locks: &StdMutex<LockTable>, key: &SessionKey) {
    let mut table = lock_table(locks);
    if table
        .get(key)
        .is_some_and(|mutex| Arc::strong_count(mutex) == 1)
    {
        table.remove(key);
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn lock(&self, key: &SessionKey) -> SessionGuard {
        let guard = self.mutex_for(key).lock_owned().await;
        let locks = Arc::clone(&self.locks);
        let key = key.clone();
        SessionGuard::new(guard).on_release(move || release(&locks, &key))
    }

    async fn get(&self, key: &SessionKey) -> Result<Option<TripSession>, StoreError> {
        Ok(self.sessions.read().await.get(key).cloned())
    }

    async fn put(&self, key: &SessionKey, session: TripSession) -> Result<(), StoreError> {
        self.sessions.write().await.insert(key.clone(), session);
        Ok(())
    }

    async fn delete(&self, key: &SessionKey) -> Result<bool, StoreError> {
        Ok(self.sessions.write().await.remove(key).is_some())
    }
}
