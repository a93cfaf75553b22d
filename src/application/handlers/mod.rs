//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod assistant;
pub mod trip;

pub use assistant::{AskAssistantCommand, AskAssistantHandler, AssistantReply};
pub use trip::{
    CastVoteCommand, CastVoteHandler, ClearPreferencesCommand, ClearPreferencesHandler,
    ClearPreferencesResult, DeleteSessionCommand, DeleteSessionHandler, FinalizeTripCommand,
    FinalizeTripHandler, FinalizeTripResult, GenerateRecommendationsCommand,
    GenerateRecommendationsHandler, GenerateRecommendationsResult, GetSessionHandler,
    GetSessionQuery, ItineraryExpander, ListPreferencesHandler, ListPreferencesQuery,
    SubmitPreferenceCommand, SubmitPreferenceHandler, SubmitPreferenceResult, VoteChoice,
};
