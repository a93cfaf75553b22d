//! Trip planning command and query handlers.
//!
//! Every handler that mutates a session takes the session's lock from the
//! store first and writes the whole session back before releasing it.
//! Handlers that call the AI provider never hold the lock across the call.

mod cast_vote;
mod clear_preferences;
mod delete_session;
mod expand_itinerary;
mod finalize_trip;
mod generate_recommendations;
mod get_session;
mod list_preferences;
mod submit_preference;

pub use cast_vote::{CastVoteCommand, CastVoteHandler, VoteChoice};
pub use clear_preferences::{
    ClearPreferencesCommand, ClearPreferencesHandler, ClearPreferencesResult,
};
pub use delete_session::{DeleteSessionCommand, DeleteSessionHandler};
pub use expand_itinerary::ItineraryExpander;
pub use finalize_trip::{FinalizeTripCommand, FinalizeTripHandler, FinalizeTripResult};
pub use generate_recommendations::{
    GenerateRecommendationsCommand, GenerateRecommendationsHandler,
    GenerateRecommendationsResult,
};
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use list_preferences::{ListPreferencesHandler, ListPreferencesQuery};
pub use submit_preference::{
    SubmitPreferenceCommand, SubmitPreferenceHandler, SubmitPreferenceResult,
};
