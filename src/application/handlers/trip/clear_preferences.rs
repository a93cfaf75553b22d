//! ClearPreferencesHandler - Command handler for wiping a session's preferences.

use std::sync::Arc;

use crate::domain::foundation::SessionKey;
use crate::domain::trip::TripPlanningError;
use crate::ports::SessionStore;

/// Command to clear every preference in a session.
#[derive(Debug, Clone)]
pub struct ClearPreferencesCommand {
    pub session_key: SessionKey,
}

/// Result of clearing preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearPreferencesResult {
    pub cleared: usize,
}

/// Handler for clearing preferences. Trips and votes are untouched.
pub struct ClearPreferencesHandler {
    store: Arc<dyn SessionStore>,
}

impl ClearPreferencesHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: ClearPreferencesCommand,
    ) -> Result<ClearPreferencesResult, TripPlanningError> {
        let _guard = self.store.lock(&cmd.session_key).await;

        let Some(mut session) = self.store.get(&cmd.session_key).await? else {
            return Ok(ClearPreferencesResult { cleared: 0 });
        };

        let cleared = session.clear_preferences();
        self.store.put(&cmd.session_key, session).await?;

        tracing::info!(session = %cmd.session_key, cleared, "Preferences cleared");
        Ok(ClearPreferencesResult { cleared })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::trip::{PreferenceRecord, TripOption, TripSession};

    fn trip(name: &str) -> TripOption {
        TripOption {
            name: name.to_string(),
            dates: "May".to_string(),
            trip_style: "relax".to_string(),
            budget: "$900".to_string(),
            activities: vec!["Swim".to_string()],
        }
    }

    #[tokio::test]
    async fn clears_preferences_but_keeps_trips_and_votes() {
        let store = Arc::new(InMemorySessionStore::new());
        let key = SessionKey::from(3u64);
        let mut session = TripSession::new();
        session.add_preference(
            PreferenceRecord::new("alice", "beach", "1000", "May", "relax").unwrap(),
        );
        session.install_recommendations(vec![trip("A")]);
        session.cast_vote(1).unwrap();
        store.put(&key, session).await.unwrap();

        let result = ClearPreferencesHandler::new(store.clone())
            .handle(ClearPreferencesCommand {
                session_key: key.clone(),
            })
            .await
            .unwrap();

        assert_eq!(result.cleared, 1);
        let session = store.get(&key).await.unwrap().unwrap();
        assert!(session.preferences().is_empty());
        assert_eq!(session.recommended_trips().map(|t| t.len()), Some(1));
        assert_eq!(session.ballot().votes_for("A"), Some(1));
    }

    #[tokio::test]
    async fn unknown_session_clears_nothing_and_creates_nothing() {
        let store = Arc::new(InMemorySessionStore::new());

        let result = ClearPreferencesHandler::new(store.clone())
            .handle(ClearPreferencesCommand {
                session_key: SessionKey::from(9u64),
            })
            .await
            .unwrap();

        assert_eq!(result.cleared, 0);
        assert_eq!(store.session_count().await, 0);
    }
}
