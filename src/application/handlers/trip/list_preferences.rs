//! ListPreferencesHandler - Query handler returning a session's preferences in order.

use std::sync::Arc;

use crate::domain::foundation::SessionKey;
use crate::domain::trip::{PreferenceRecord, TripPlanningError};
use crate::ports::SessionStore;

/// Query for a session's preferences.
#[derive(Debug, Clone)]
pub struct ListPreferencesQuery {
    pub session_key: SessionKey,
}

/// Handler for listing preferences.
pub struct ListPreferencesHandler {
    store: Arc<dyn SessionStore>,
}

impl ListPreferencesHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Empty for an unknown session.
    pub async fn handle(
        &self,
        query: ListPreferencesQuery,
    ) -> Result<Vec<PreferenceRecord>, TripPlanningError> {
        Ok(self
            .store
            .get(&query.session_key)
            .await?
            .map(|session| session.preferences().to_vec())
            .unwrap_or_default())
    }
}
