//! HTTP DTOs for planning session endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::VoteChoice;
use crate::domain::trip::{Ballot, PreferenceRecord, TallyEntry, TripOption, TripSession};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to submit one person's preference.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitPreferenceRequest {
    pub user: String,
    pub location: String,
    pub budget: String,
    pub dates: String,
    pub mode: String,
}

/// Request to vote, by 1-based trip number or by trip name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoteRequest {
    #[serde(default)]
    pub ordinal: Option<usize>,
    #[serde(default)]
    pub trip_name: Option<String>,
}

impl VoteRequest {
    /// Exactly one of `ordinal` and `trip_name` must be set.
    pub fn into_choice(self) -> Result<VoteChoice, &'static str> {
        match (self.ordinal, self.trip_name) {
            (Some(ordinal), None) => Ok(VoteChoice::Ordinal(ordinal)),
            (None, Some(name)) if !name.trim().is_empty() => Ok(VoteChoice::Name(name)),
            (None, _) => Err("vote needs either 'ordinal' or 'trip_name'"),
            (Some(_), Some(_)) => Err("vote takes 'ordinal' or 'trip_name', not both"),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct PreferenceSubmittedResponse {
    pub message: String,
    pub preference: PreferenceRecord,
    pub preference_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreferencesResponse {
    pub preferences: Vec<PreferenceRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClearedResponse {
    pub cleared: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationsResponse {
    pub recommended_trips: Vec<TripOption>,
    pub votes: Ballot,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    pub message: String,
    pub trip_name: String,
    pub votes: Vec<TallyEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinalizeResponse {
    pub finalized_trip: TripOption,
    pub votes: Vec<TallyEntry>,
    pub itinerary: String,
}

/// Full view of a planning session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub preferences: Vec<PreferenceRecord>,
    pub recommended_trips: Option<Vec<TripOption>>,
    pub votes: Ballot,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionResponse {
    pub fn new(session_id: impl Into<String>, session: &TripSession) -> Self {
        Self {
            session_id: session_id.into(),
            preferences: session.preferences().to_vec(),
            recommended_trips: session.recommended_trips().map(<[TripOption]>::to_vec),
            votes: session.ballot().clone(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        }
    }
}
