//! SubmitPreferenceHandler - Command handler for adding a traveller's preferences.

use std::sync::Arc;

use crate::domain::foundation::SessionKey;
use crate::domain::trip::{PreferenceRecord, TripPlanningError, TripSession};
use crate::ports::SessionStore;

/// Command to record one traveller's preferences.
#[derive(Debug, Clone)]
pub struct SubmitPreferenceCommand {
    pub session_key: SessionKey,
    pub user: String,
    pub location: String,
    pub budget: String,
    pub dates: String,
    pub mode: String,
}

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmitPreferenceResult {
    pub preference: PreferenceRecord,
    /// Number of preferences in the session after this one.
    pub preference_count: usize,
}

/// Handler for submitting preferences.
///
/// Creates the session on first submission.
pub struct SubmitPreferenceHandler {
    store: Arc<dyn SessionStore>,
}

impl SubmitPreferenceHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: SubmitPreferenceCommand,
    ) -> Result<SubmitPreferenceResult, TripPlanningError> {
        let preference =
            PreferenceRecord::new(cmd.user, cmd.location, cmd.budget, cmd.dates, cmd.mode)?;

        let _guard = self.store.lock(&cmd.session_key).await;
        let mut session = self
            .store
            .get(&cmd.session_key)
            .await?
            .unwrap_or_else(TripSession::new);

        session.add_preference(preference.clone());
        let preference_count = session.preferences().len();
        self.store.put(&cmd.session_key, session).await?;

        tracing::info!(
            session = %cmd.session_key,
            user = preference.user(),
            preference_count,
            "Preference submitted"
        );

        Ok(SubmitPreferenceResult {
            preference,
            preference_count,
        })
    }
}
