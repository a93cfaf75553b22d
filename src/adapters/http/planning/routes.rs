//! HTTP routes for planning session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    cast_vote, clear_preferences, delete_session, finalize_trip, generate_recommendations,
    get_session, list_preferences, submit_preference, PlanningHandlers,
};

/// Creates the planning router, mounted under `/api/sessions`.
pub fn planning_routes(handlers: PlanningHandlers) -> Router {
    Router::new()
        .route("/:id", get(get_session).delete(delete_session))
        .route(
            "/:id/preferences",
            post(submit_preference)
                .get(list_preferences)
                .delete(clear_preferences),
        )
        .route("/:id/recommendations", post(generate_recommendations))
        .route("/:id/votes", post(cast_vote))
        .route("/:id/finalize", post(finalize_trip))
        .with_state(handlers)
}
