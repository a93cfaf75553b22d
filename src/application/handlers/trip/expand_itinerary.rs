//! ItineraryExpander - turns a trip option into a day-by-day itinerary.

use std::sync::Arc;

use crate::application::LlmGateway;
use crate::domain::foundation::SessionKey;
use crate::domain::trip::{
    itinerary_prompt, sanitize, tidy_itinerary, TripOption, TripPlanningError,
};

/// Expands trips through the gateway. Stateless apart from the gateway.
#[derive(Clone)]
pub struct ItineraryExpander {
    gateway: Arc<LlmGateway>,
}

impl ItineraryExpander {
    pub fn new(gateway: Arc<LlmGateway>) -> Self {
        Self { gateway }
    }

    /// Asks for a detailed itinerary in plain text, strips any code fence
    /// and tidies the reply.
    ///
    /// # Errors
    ///
    /// `Upstream` if the AI call fails, `EmptyItinerary` if the reply is blank.
    pub async fn expand(
        &self,
        trip: &TripOption,
        session: Option<&SessionKey>,
    ) -> Result<String, TripPlanningError> {
        let prompt = itinerary_prompt(trip);
        let raw = self
            .gateway
            .complete("itinerary", session, &prompt, false)
            .await?;
        tidy_itinerary(&sanitize(&raw))
    }
}
