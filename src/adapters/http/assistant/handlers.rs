//! HTTP handlers for assistant and lookup endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{handle_lookup_error, handle_planning_error, ErrorResponse};
use crate::application::{AskAssistantCommand, AskAssistantHandler, LlmGateway};
use crate::ports::{Coordinates, PlaceLookup};

use super::dto::{ChatRequest, ChatResponse, GeocodeQuery, GeocodeResponse, WeatherQuery};

/// Search radius around a geocoded location, in metres.
const PLACES_RADIUS_M: u32 = 10_000;

/// Application state for assistant endpoints.
#[derive(Clone)]
pub struct AssistantAppState {
    ask_handler: Arc<AskAssistantHandler>,
    lookup: Arc<dyn PlaceLookup>,
}

impl AssistantAppState {
    pub fn new(gateway: Arc<LlmGateway>, lookup: Arc<dyn PlaceLookup>) -> Self {
        Self {
            ask_handler: Arc::new(AskAssistantHandler::new(gateway, lookup.clone())),
            lookup,
        }
    }
}

fn location_not_found(location: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::not_found("Location", location)),
    )
        .into_response()
}

/// POST /api/chat
pub async fn chat(State(state): State<AssistantAppState>, Json(req): Json<ChatRequest>) -> Response {
    if req.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("message cannot be empty")),
        )
            .into_response();
    }

    let cmd = AskAssistantCommand {
        message: req.message,
    };
    match state.ask_handler.handle(cmd).await {
        Ok(reply) => (StatusCode::OK, Json(ChatResponse::from(reply))).into_response(),
        Err(e) => handle_planning_error(e),
    }
}

/// GET /api/geocode?location=
pub async fn geocode(
    State(state): State<AssistantAppState>,
    Query(query): Query<GeocodeQuery>,
) -> Response {
    match state.lookup.geocode(&query.location).await {
        Ok(Some(coords)) => (StatusCode::OK, Json(GeocodeResponse::from(coords))).into_response(),
        Ok(None) => location_not_found(&query.location),
        Err(e) => handle_lookup_error(e),
    }
}

/// GET /api/places?location=
///
/// Geocodes the location, then returns the raw points-of-interest document.
pub async fn places(
    State(state): State<AssistantAppState>,
    Query(query): Query<GeocodeQuery>,
) -> Response {
    let near = match state.lookup.geocode(&query.location).await {
        Ok(Some(coords)) => coords,
        Ok(None) => return location_not_found(&query.location),
        Err(e) => return handle_lookup_error(e),
    };

    match state.lookup.points_of_interest(near, PLACES_RADIUS_M).await {
        Ok(document) => (StatusCode::OK, Json(document)).into_response(),
        Err(e) => handle_lookup_error(e),
    }
}

/// GET /api/weather?lat=&lon=
pub async fn weather(
    State(state): State<AssistantAppState>,
    Query(query): Query<WeatherQuery>,
) -> Response {
    match state
        .lookup
        .current_weather(Coordinates::new(query.lat, query.lon))
        .await
    {
        Ok(document) => (StatusCode::OK, Json(document)).into_response(),
        Err(e) => handle_lookup_error(e),
    }
}
