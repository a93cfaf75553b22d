//! GenerateRecommendationsHandler - Command handler that turns the group's
//! preferences into AI-proposed trip options and opens a ballot for them.

use std::sync::Arc;

use crate::application::LlmGateway;
use crate::domain::foundation::SessionKey;
use crate::domain::trip::{recommendation_prompt, Ballot, TripOption, TripPlanningError};
use crate::ports::SessionStore;

/// Command to generate trip recommendations for a session.
#[derive(Debug, Clone)]
pub struct GenerateRecommendationsCommand {
    pub session_key: SessionKey,
}

/// Result of a successful generation.
#[derive(Debug, Clone)]
pub struct GenerateRecommendationsResult {
    pub trips: Vec<TripOption>,
    /// The fresh ballot, every count at zero.
    pub ballot: Ballot,
}

/// Handler for generating recommendations.
pub struct GenerateRecommendationsHandler {
    store: Arc<dyn SessionStore>,
    gateway: Arc<LlmGateway>,
}

impl GenerateRecommendationsHandler {
    pub fn new(store: Arc<dyn SessionStore>, gateway: Arc<LlmGateway>) -> Self {
        Self { store, gateway }
    }

    pub async fn handle(
        &self,
        cmd: GenerateRecommendationsCommand,
    ) -> Result<GenerateRecommendationsResult, TripPlanningError> {
        let key = &cmd.session_key;

        // 1. Snapshot preferences; the lock is released before the AI call
        let preferences = {
            let _guard = self.store.lock(key).await;
            self.store
                .get(key)
                .await?
                .map(|session| session.preferences().to_vec())
                .unwrap_or_default()
        };
        if preferences.is_empty() {
            return Err(TripPlanningError::NoPreferences);
        }

        // 2. Ask for a batch and validate it as a whole
        let prompt = recommendation_prompt(&preferences);
        let raw = self
            .gateway
            .complete("recommend", Some(key), &prompt, true)
            .await?;
        let trips = TripOption::decode_batch(&raw).map_err(|err| {
            tracing::warn!(session = %key, error = %err, "Rejected AI trip batch");
            err
        })?;

        // 3. Install the batch, replacing any previous one. A session deleted
        //    during the AI call stays deleted.
        let _guard = self.store.lock(key).await;
        let Some(mut session) = self.store.get(key).await? else {
            tracing::info!(session = %key, "Session deleted during generation");
            return Err(TripPlanningError::NoPreferences);
        };
        session.install_recommendations(trips.clone());
        let ballot = session.ballot().clone();
        self.store.put(key, session).await?;

        tracing::info!(
            session = %key,
            preferences = preferences.len(),
            trips = trips.len(),
            "Recommendations generated"
        );

        Ok(GenerateRecommendationsResult { trips, ballot })
    }
}
