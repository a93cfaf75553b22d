//! HTTP handlers for planning session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{
    CastVoteCommand, CastVoteHandler, ClearPreferencesCommand, ClearPreferencesHandler,
    DeleteSessionCommand, DeleteSessionHandler, FinalizeTripCommand, FinalizeTripHandler,
    GenerateRecommendationsCommand, GenerateRecommendationsHandler, GetSessionHandler,
    GetSessionQuery, ItineraryExpander, ListPreferencesHandler, ListPreferencesQuery,
    LlmGateway, SubmitPreferenceCommand, SubmitPreferenceHandler,
};
use crate::domain::foundation::SessionKey;
use crate::ports::SessionStore;

use super::dto::{
    ClearedResponse, FinalizeResponse, PreferenceSubmittedResponse, PreferencesResponse,
    RecommendationsResponse, SessionResponse, SubmitPreferenceRequest, VoteRequest, VoteResponse,
};
use crate::adapters::http::error::{handle_planning_error, ErrorResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PlanningHandlers {
    get_handler: Arc<GetSessionHandler>,
    delete_handler: Arc<DeleteSessionHandler>,
    submit_handler: Arc<SubmitPreferenceHandler>,
    list_handler: Arc<ListPreferencesHandler>,
    clear_handler: Arc<ClearPreferencesHandler>,
    recommend_handler: Arc<GenerateRecommendationsHandler>,
    vote_handler: Arc<CastVoteHandler>,
    finalize_handler: Arc<FinalizeTripHandler>,
}

impl PlanningHandlers {
    /// Builds every planning handler over one store and gateway.
    pub fn new(store: Arc<dyn SessionStore>, gateway: Arc<LlmGateway>) -> Self {
        Self {
            get_handler: Arc::new(GetSessionHandler::new(store.clone())),
            delete_handler: Arc::new(DeleteSessionHandler::new(store.clone())),
            submit_handler: Arc::new(SubmitPreferenceHandler::new(store.clone())),
            list_handler: Arc::new(ListPreferencesHandler::new(store.clone())),
            clear_handler: Arc::new(ClearPreferencesHandler::new(store.clone())),
            recommend_handler: Arc::new(GenerateRecommendationsHandler::new(
                store.clone(),
                gateway.clone(),
            )),
            vote_handler: Arc::new(CastVoteHandler::new(store.clone())),
            finalize_handler: Arc::new(FinalizeTripHandler::new(
                store,
                ItineraryExpander::new(gateway),
            )),
        }
    }
}

fn parse_session_key(raw: String) -> Result<SessionKey, Response> {
    SessionKey::new(raw).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/sessions/:id - Session summary
pub async fn get_session(
    State(handlers): State<PlanningHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_key = match parse_session_key(session_id) {
        Ok(key) => key,
        Err(response) => return response,
    };

    let query = GetSessionQuery {
        session_key: session_key.clone(),
    };
    match handlers.get_handler.handle(query).await {
        Ok(Some(session)) => {
            let response = SessionResponse::new(session_key.as_str(), &session);
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", session_key.as_str())),
        )
            .into_response(),
        Err(e) => handle_planning_error(e),
    }
}

/// DELETE /api/sessions/:id - Drop a session
pub async fn delete_session(
    State(handlers): State<PlanningHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_key = match parse_session_key(session_id) {
        Ok(key) => key,
        Err(response) => return response,
    };

    let cmd = DeleteSessionCommand {
        session_key: session_key.clone(),
    };
    match handlers.delete_handler.handle(cmd).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", session_key.as_str())),
        )
            .into_response(),
        Err(e) => handle_planning_error(e),
    }
}

/// POST /api/sessions/:id/preferences - Submit a preference
pub async fn submit_preference(
    State(handlers): State<PlanningHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<SubmitPreferenceRequest>,
) -> Response {
    let session_key = match parse_session_key(session_id) {
        Ok(key) => key,
        Err(response) => return response,
    };

    let cmd = SubmitPreferenceCommand {
        session_key,
        user: req.user,
        location: req.location,
        budget: req.budget,
        dates: req.dates,
        mode: req.mode,
    };
    match handlers.submit_handler.handle(cmd).await {
        Ok(result) => {
            let response = PreferenceSubmittedResponse {
                message: "Preference submitted successfully".to_string(),
                preference: result.preference,
                preference_count: result.preference_count,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_planning_error(e),
    }
}

/// GET /api/sessions/:id/preferences - List preferences
pub async fn list_preferences(
    State(handlers): State<PlanningHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_key = match parse_session_key(session_id) {
        Ok(key) => key,
        Err(response) => return response,
    };

    match handlers
        .list_handler
        .handle(ListPreferencesQuery { session_key })
        .await
    {
        Ok(preferences) => (StatusCode::OK, Json(PreferencesResponse { preferences })).into_response(),
        Err(e) => handle_planning_error(e),
    }
}

/// DELETE /api/sessions/:id/preferences - Clear preferences
pub async fn clear_preferences(
    State(handlers): State<PlanningHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_key = match parse_session_key(session_id) {
        Ok(key) => key,
        Err(response) => return response,
    };

    match handlers
        .clear_handler
        .handle(ClearPreferencesCommand { session_key })
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(ClearedResponse {
                cleared: result.cleared,
            }),
        )
            .into_response(),
        Err(e) => handle_planning_error(e),
    }
}

/// POST /api/sessions/:id/recommendations - Generate trip options
pub async fn generate_recommendations(
    State(handlers): State<PlanningHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_key = match parse_session_key(session_id) {
        Ok(key) => key,
        Err(response) => return response,
    };

    match handlers
        .recommend_handler
        .handle(GenerateRecommendationsCommand { session_key })
        .await
    {
        Ok(result) => {
            let response = RecommendationsResponse {
                recommended_trips: result.trips,
                votes: result.ballot,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_planning_error(e),
    }
}

/// POST /api/sessions/:id/votes - Cast a vote
pub async fn cast_vote(
    State(handlers): State<PlanningHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<VoteRequest>,
) -> Response {
    let session_key = match parse_session_key(session_id) {
        Ok(key) => key,
        Err(response) => return response,
    };
    let choice = match req.into_choice() {
        Ok(choice) => choice,
        Err(message) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(message)))
                .into_response()
        }
    };

    match handlers
        .vote_handler
        .handle(CastVoteCommand {
            session_key,
            choice,
        })
        .await
    {
        Ok(receipt) => {
            let response = VoteResponse {
                message: format!("Vote for {} recorded", receipt.trip_name),
                trip_name: receipt.trip_name,
                votes: receipt.tally,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_planning_error(e),
    }
}

/// POST /api/sessions/:id/finalize - Pick the winner and expand its itinerary
pub async fn finalize_trip(
    State(handlers): State<PlanningHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_key = match parse_session_key(session_id) {
        Ok(key) => key,
        Err(response) => return response,
    };

    match handlers
        .finalize_handler
        .handle(FinalizeTripCommand { session_key })
        .await
    {
        Ok(result) => {
            let response = FinalizeResponse {
                finalized_trip: result.trip,
                votes: result.tally,
                itinerary: result.itinerary,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_planning_error(e),
    }
}
