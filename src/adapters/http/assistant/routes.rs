//! HTTP routes for assistant and lookup endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{chat, geocode, places, weather, AssistantAppState};

/// Creates the assistant router, mounted under `/api`.
pub fn assistant_routes(state: AssistantAppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/geocode", get(geocode))
        .route("/places", get(places))
        .route("/weather", get(weather))
        .with_state(state)
}
