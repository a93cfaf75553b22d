//! FinalizeTripHandler - picks the winning trip and expands it into an itinerary.

use std::sync::Arc;

use crate::domain::foundation::SessionKey;
use crate::domain::trip::{TallyEntry, TripOption, TripPlanningError};
use crate::ports::SessionStore;

use super::ItineraryExpander;

/// Command to finalize a session's trip.
#[derive(Debug, Clone)]
pub struct FinalizeTripCommand {
    pub session_key: SessionKey,
}

/// The winner, the tally it won with and its itinerary.
#[derive(Debug, Clone)]
pub struct FinalizeTripResult {
    pub trip: TripOption,
    pub tally: Vec<TallyEntry>,
    pub itinerary: String,
}

/// Handler for finalizing.
///
/// Read-only with respect to the session; finalizing twice expands the
/// current winner twice.
pub struct FinalizeTripHandler {
    store: Arc<dyn SessionStore>,
    expander: ItineraryExpander,
}

impl FinalizeTripHandler {
    pub fn new(store: Arc<dyn SessionStore>, expander: ItineraryExpander) -> Self {
        Self { store, expander }
    }

    pub async fn handle(
        &self,
        cmd: FinalizeTripCommand,
    ) -> Result<FinalizeTripResult, TripPlanningError> {
        let key = &cmd.session_key;

        let (trip, tally) = {
            let _guard = self.store.lock(key).await;
            let session = self.store.get(key).await?.ok_or(TripPlanningError::NoVotesCast)?;
            let trip = session.winner()?.clone();
            (trip, session.ballot().entries().to_vec())
        };

        tracing::info!(session = %key, winner = %trip.name, "Finalizing trip");
        let itinerary = self.expander.expand(&trip, Some(key)).await?;

        Ok(FinalizeTripResult {
            trip,
            tally,
            itinerary,
        })
    }
}
