//! AskAssistantHandler - free-form travel question to structured suggestion.
//!
//! The AI is asked for a JSON object naming a trip, a location and points of
//! interest. The location is geocoded so clients can show it on a map. When
//! the reply is not JSON the raw text is passed through as the response.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::application::LlmGateway;
use crate::domain::trip::{assistant_prompt, parse_json, TripPlanningError};
use crate::ports::{Coordinates, PlaceLookup};

const NO_RECOMMENDATION: &str = "No recommendation provided.";

/// Command carrying the traveller's message.
#[derive(Debug, Clone)]
pub struct AskAssistantCommand {
    pub message: String,
}

/// Structured assistant answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantReply {
    pub response: String,
    pub location: Option<String>,
    pub location_coords: Option<Coordinates>,
    pub points_of_interest: Vec<Value>,
}

impl AssistantReply {
    fn raw_text(text: String) -> Self {
        Self {
            response: text,
            location: None,
            location_coords: None,
            points_of_interest: Vec::new(),
        }
    }
}

/// Handler for assistant questions.
pub struct AskAssistantHandler {
    gateway: Arc<LlmGateway>,
    lookup: Arc<dyn PlaceLookup>,
}

impl AskAssistantHandler {
    pub fn new(gateway: Arc<LlmGateway>, lookup: Arc<dyn PlaceLookup>) -> Self {
        Self { gateway, lookup }
    }

    pub async fn handle(&self, cmd: AskAssistantCommand) -> Result<AssistantReply, TripPlanningError> {
        let prompt = assistant_prompt(&cmd.message);
        let raw = self.gateway.complete("assistant", None, &prompt, true).await?;

        let object = match parse_json(&raw) {
            Ok(Value::Object(object)) => object,
            Ok(_) | Err(_) => {
                tracing::debug!("Assistant reply is not a JSON object, passing text through");
                return Ok(AssistantReply::raw_text(raw));
            }
        };

        let response = object
            .get("recommended_trip")
            .and_then(Value::as_str)
            .unwrap_or(NO_RECOMMENDATION)
            .to_string();
        let location = object
            .get("location")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);
        let points_of_interest = object
            .get("points_of_interest")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let location_coords = match &location {
            Some(name) => self.locate(name).await,
            None => None,
        };

        Ok(AssistantReply {
            response,
            location,
            location_coords,
            points_of_interest,
        })
    }

    /// Geocoding is best effort; failures only cost the map pin.
    async fn locate(&self, name: &str) -> Option<Coordinates> {
        match self.lookup.geocode(name).await {
            Ok(coords) => coords,
            Err(err) => {
                tracing::warn!(location = %name, error = %err, "Geocoding assistant location failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::ports::LookupError;
    use async_trait::async_trait;

    struct FixedLookup {
        result: Result<Option<Coordinates>, LookupError>,
    }

    #[async_trait]
    impl PlaceLookup for FixedLookup {
        async fn geocode(&self, _location: &str) -> Result<Option<Coordinates>, LookupError> {
            self.result.clone()
        }

        async fn points_of_interest(
            &self,
            _near: Coordinates,
            _radius_m: u32,
        ) -> Result<Value, LookupError> {
            Ok(Value::Null)
        }

        async fn current_weather(&self, _at: Coordinates) -> Result<Value, LookupError> {
            Ok(Value::Null)
        }
    }

    fn handler(reply: &str, lookup: FixedLookup) -> (AskAssistantHandler, MockAIProvider) {
        let provider = MockAIProvider::new().with_response(reply);
        let gateway = Arc::new(LlmGateway::new(Arc::new(provider.clone())));
        (AskAssistantHandler::new(gateway, Arc::new(lookup)), provider)
    }

    fn ask(message: &str) -> AskAssistantCommand {
        AskAssistantCommand {
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn structured_reply_is_geocoded() {
        let reply = r#"{"recommended_trip": "Go to Lisbon", "location": "Lisbon",
            "points_of_interest": [{"name": "Belem Tower", "type": "monument", "latitude": 38.69, "longitude": -9.21}]}"#;
        let (handler, provider) = handler(
            reply,
            FixedLookup {
                result: Ok(Some(Coordinates::new(38.72, -9.14))),
            },
        );

        let answer = handler.handle(ask("Somewhere sunny in May?")).await.unwrap();

        assert_eq!(answer.response, "Go to Lisbon");
        assert_eq!(answer.location.as_deref(), Some("Lisbon"));
        assert_eq!(answer.location_coords, Some(Coordinates::new(38.72, -9.14)));
        assert_eq!(answer.points_of_interest.len(), 1);
        let prompt = provider.last_prompt().unwrap();
        assert!(prompt.starts_with("Somewhere sunny in May?"));
        assert!(prompt.contains("recommended_trip"));
    }

    #[tokio::test]
    async fn non_json_reply_passes_text_through() {
        let (handler, _) = handler("Try Lisbon!", FixedLookup { result: Ok(None) });

        let answer = handler.handle(ask("hi")).await.unwrap();

        assert_eq!(answer, AssistantReply::raw_text("Try Lisbon!".to_string()));
    }

    #[tokio::test]
    async fn geocoding_failure_only_drops_coordinates() {
        let reply = r#"{"recommended_trip": "Go", "location": "Atlantis"}"#;
        let (handler, _) = handler(
            reply,
            FixedLookup {
                result: Err(LookupError::Status {
                    service: "nominatim",
                    status: 500,
                }),
            },
        );

        let answer = handler.handle(ask("hi")).await.unwrap();

        assert_eq!(answer.location.as_deref(), Some("Atlantis"));
        assert!(answer.location_coords.is_none());
        assert!(answer.points_of_interest.is_empty());
    }

    #[tokio::test]
    async fn missing_recommendation_gets_placeholder() {
        let (handler, _) = handler(r#"{"location": ""}"#, FixedLookup { result: Ok(None) });

        let answer = handler.handle(ask("hi")).await.unwrap();

        assert_eq!(answer.response, NO_RECOMMENDATION);
        assert!(answer.location.is_none());
    }
}
