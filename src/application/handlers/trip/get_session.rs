//! GetSessionHandler - Query handler for a session snapshot.

use std::sync::Arc;

use crate::domain::foundation::SessionKey;
use crate::domain::trip::{TripPlanningError, TripSession};
use crate::ports::SessionStore;

/// Query to get a session by key.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_key: SessionKey,
}

/// Handler for retrieving a session.
pub struct GetSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl GetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// `None` when nobody has submitted to this session yet.
    pub async fn handle(
        &self,
        query: GetSessionQuery,
    ) -> Result<Option<TripSession>, TripPlanningError> {
        Ok(self.store.get(&query.session_key).await?)
    }
}
