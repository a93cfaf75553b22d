//! HTTP adapter for group trip planning sessions.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ClearedResponse, FinalizeResponse, PreferenceSubmittedResponse, PreferencesResponse,
    RecommendationsResponse, SessionResponse, SubmitPreferenceRequest, VoteRequest, VoteResponse,
};
pub use handlers::PlanningHandlers;
pub use routes::planning_routes;
