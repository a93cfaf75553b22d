//! HTTP DTOs for assistant and lookup endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::AssistantReply;
use crate::ports::Coordinates;

/// Free-text question for the assistant.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Assistant answer. Coordinates are `[latitude, longitude]` for map widgets.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub location: Option<String>,
    pub location_coords: Option<[f64; 2]>,
    pub points_of_interest: Vec<Value>,
}

impl From<AssistantReply> for ChatResponse {
    fn from(reply: AssistantReply) -> Self {
        Self {
            response: reply.response,
            location: reply.location,
            location_coords: reply
                .location_coords
                .map(|c| [c.latitude, c.longitude]),
            points_of_interest: reply.points_of_interest,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeQuery {
    pub location: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeocodeResponse {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Coordinates> for GeocodeResponse {
    fn from(coords: Coordinates) -> Self {
        Self {
            latitude: coords.latitude,
            longitude: coords.longitude,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherQuery {
    pub lat: f64,
    pub lon: f64,
}
