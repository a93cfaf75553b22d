//! Integration tests for the HTTP surface.
//!
//! These tests drive the full axum router with a scripted AI provider and a
//! canned place lookup:
//! 1. The planning workflow over `/api/sessions/:id/...`
//! 2. Error status codes and bodies
//! 3. Assistant and lookup endpoints

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use tripvote::adapters::ai::MockAIProvider;
use tripvote::adapters::http::build_router;
use tripvote::adapters::storage::InMemorySessionStore;
use tripvote::config::{ChatConfig, ServerConfig};
use tripvote::ports::{Coordinates, LookupError, PlaceLookup};
use tripvote::state::AppState;

// =============================================================================
// Test Infrastructure
// =============================================================================

const TRIPS: &str = r#"```json
[
  {"name": "Coastal Escape", "dates": "3/10-3/16", "trip_style": "relax", "budget": "$1,200", "activities": ["Snorkeling", "Beach yoga"]},
  {"name": "Capital Culture", "dates": "3/11-3/15", "trip_style": "exploring", "budget": "$1,400", "activities": ["Smithsonian museums"]}
]
```"#;

/// Knows one city and has no weather key.
struct CannedLookup;

#[async_trait]
impl PlaceLookup for CannedLookup {
    async fn geocode(&self, location: &str) -> Result<Option<Coordinates>, LookupError> {
        if location.eq_ignore_ascii_case("lisbon") {
            Ok(Some(Coordinates::new(38.72, -9.14)))
        } else {
            Ok(None)
        }
    }

    async fn points_of_interest(
        &self,
        near: Coordinates,
        radius_m: u32,
    ) -> Result<Value, LookupError> {
        Ok(json!({
            "elements": [{"lat": near.latitude, "lon": near.longitude, "tags": {"tourism": "museum"}}],
            "radius": radius_m
        }))
    }

    async fn current_weather(&self, _at: Coordinates) -> Result<Value, LookupError> {
        Err(LookupError::NotConfigured("openweathermap_api_key"))
    }
}

fn app(provider: &MockAIProvider) -> Router {
    let state = AppState::new(
        Arc::new(provider.clone()),
        Arc::new(CannedLookup),
        Arc::new(InMemorySessionStore::new()),
        None,
        ChatConfig::default(),
    );
    build_router(state, &ServerConfig::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn preference(user: &str, location: &str, budget: &str, dates: &str, mode: &str) -> Value {
    json!({"user": user, "location": location, "budget": budget, "dates": dates, "mode": mode})
}

// =============================================================================
// Planning workflow
// =============================================================================

#[tokio::test]
async fn full_planning_workflow() {
    let provider = MockAIProvider::new()
        .with_response(TRIPS)
        .with_response("Day 1: Arrive\n\n\n\nDay 2: Museums");
    let app = app(&provider);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sessions/1/preferences",
        Some(preference("alice", "beach", "1,000", "3/10-3/16", "Relax")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["preference"]["mode"], "relax");
    assert_eq!(body["preference_count"], 1);

    send(
        &app,
        Method::POST,
        "/api/sessions/1/preferences",
        Some(preference("bob", "washington d.c.", "1,500", "3/11-3/15", "exploring")),
    )
    .await;

    let (status, body) = send(&app, Method::POST, "/api/sessions/1/recommendations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommended_trips"].as_array().unwrap().len(), 2);
    assert_eq!(
        body["votes"],
        json!([
            {"trip_name": "Coastal Escape", "votes": 0},
            {"trip_name": "Capital Culture", "votes": 0}
        ])
    );

    let prompt = provider.last_prompt().unwrap();
    assert!(prompt.contains("- alice wants to travel to beach on a relax trip"));
    assert!(prompt.contains("- bob wants to travel to washington d.c."));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/sessions/1/votes",
        Some(json!({"ordinal": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(
        &app,
        Method::POST,
        "/api/sessions/1/votes",
        Some(json!({"trip_name": "Capital Culture"})),
    )
    .await;
    assert_eq!(body["message"], "Vote for Capital Culture recorded");
    assert_eq!(body["votes"][1]["votes"], 2);

    let (status, body) = send(&app, Method::POST, "/api/sessions/1/finalize", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["finalized_trip"]["name"], "Capital Culture");
    assert_eq!(body["itinerary"], "Day 1: Arrive\nDay 2: Museums");

    let (status, body) = send(&app, Method::GET, "/api/sessions/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_id"], "1");
    assert_eq!(body["preferences"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn sessions_are_isolated() {
    let app = app(&MockAIProvider::new());

    send(
        &app,
        Method::POST,
        "/api/sessions/1/preferences",
        Some(preference("alice", "rome", "800", "June", "food")),
    )
    .await;

    let (_, body) = send(&app, Method::GET, "/api/sessions/2/preferences", None).await;
    assert_eq!(body["preferences"], json!([]));
    let (_, body) = send(&app, Method::GET, "/api/sessions/1/preferences", None).await;
    assert_eq!(body["preferences"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn clear_then_recommend_is_conflict() {
    let provider = MockAIProvider::new();
    let app = app(&provider);

    send(
        &app,
        Method::POST,
        "/api/sessions/5/preferences",
        Some(preference("alice", "rome", "800", "June", "food")),
    )
    .await;
    let (status, body) = send(&app, Method::DELETE, "/api/sessions/5/preferences", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cleared"], 1);

    let (status, body) = send(&app, Method::POST, "/api/sessions/5/recommendations", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "NO_PREFERENCES");
    assert_eq!(provider.call_count(), 0);
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn invalid_preference_is_bad_request() {
    let app = app(&MockAIProvider::new());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sessions/1/preferences",
        Some(preference("alice", "rome", "lots", "June", "food")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PREFERENCE");
    assert_eq!(body["details"]["field"], "budget");
}

#[tokio::test]
async fn malformed_ai_reply_is_bad_gateway_with_raw_text() {
    let app = app(&MockAIProvider::new().with_response("Sure! Here are some trips."));

    send(
        &app,
        Method::POST,
        "/api/sessions/1/preferences",
        Some(preference("alice", "rome", "800", "June", "food")),
    )
    .await;
    let (status, body) = send(&app, Method::POST, "/api/sessions/1/recommendations", None).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "MALFORMED_RESPONSE");
    assert_eq!(body["details"]["raw_response"], "Sure! Here are some trips.");

    let (_, session) = send(&app, Method::GET, "/api/sessions/1", None).await;
    assert!(session["recommended_trips"].is_null());
}

#[tokio::test]
async fn voting_errors() {
    let app = app(&MockAIProvider::new().with_response(TRIPS));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sessions/1/votes",
        Some(json!({"ordinal": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "NO_ACTIVE_BALLOT");

    send(
        &app,
        Method::POST,
        "/api/sessions/1/preferences",
        Some(preference("alice", "rome", "800", "June", "food")),
    )
    .await;
    send(&app, Method::POST, "/api/sessions/1/recommendations", None).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sessions/1/votes",
        Some(json!({"ordinal": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "OUT_OF_RANGE");

    let (status, _) = send(&app, Method::POST, "/api/sessions/1/votes", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::POST, "/api/sessions/1/finalize", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "NO_VOTES_CAST");
}

#[tokio::test]
async fn unknown_session_is_not_found_and_delete_removes() {
    let app = app(&MockAIProvider::new());

    let (status, body) = send(&app, Method::GET, "/api/sessions/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    send(
        &app,
        Method::POST,
        "/api/sessions/9/preferences",
        Some(preference("alice", "rome", "800", "June", "food")),
    )
    .await;
    let (status, _) = send(&app, Method::DELETE, "/api/sessions/9", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, "/api/sessions/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Assistant and lookups
// =============================================================================

#[tokio::test]
async fn root_and_health() {
    let app = app(&MockAIProvider::new());

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Tripvote backend is running!");

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["provider"]["model"], "mock-model-1");
}

#[tokio::test]
async fn chat_returns_structured_suggestion() {
    let provider = MockAIProvider::new().with_response(
        r#"{"recommended_trip": "Three days in Lisbon", "location": "Lisbon", "points_of_interest": ["Belem Tower"]}"#,
    );
    let app = app(&provider);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/chat",
        Some(json!({"message": "Somewhere sunny in April?"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Three days in Lisbon");
    assert_eq!(body["location_coords"], json!([38.72, -9.14]));
    assert_eq!(body["points_of_interest"], json!(["Belem Tower"]));
}

#[tokio::test]
async fn geocode_places_and_weather() {
    let app = app(&MockAIProvider::new());

    let (status, body) = send(&app, Method::GET, "/api/geocode?location=Lisbon", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"latitude": 38.72, "longitude": -9.14}));

    let (status, _) = send(&app, Method::GET, "/api/geocode?location=Atlantis", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/api/places?location=Lisbon", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["radius"], 10000);

    let (status, body) = send(&app, Method::GET, "/api/weather?lat=38.7&lon=-9.1", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "NOT_CONFIGURED");
}
