//! Trip planning error taxonomy.

use thiserror::Error;

use crate::domain::foundation::ValidationError;

/// Errors produced by the trip planning workflow.
///
/// Every variant is terminal for the request that raised it. Session state
/// is left exactly as it was before the failing operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripPlanningError {
    /// A submitted preference field is missing or malformed.
    #[error("invalid preference: {0}")]
    InvalidPreference(#[from] ValidationError),

    /// Recommendations were requested before anyone submitted preferences.
    #[error("no preferences have been submitted for this session")]
    NoPreferences,

    /// The completion API could not be reached or returned an error.
    #[error("AI service error: {0}")]
    Upstream(String),

    /// The AI reply was not the JSON that was asked for.
    #[error("AI response is not a valid JSON trip list: {reason}")]
    MalformedResponse { reason: String, raw: String },

    /// The AI reply parsed, but an element is not a complete trip option.
    #[error("AI trip option {} is invalid: {reason}", .index + 1)]
    InvalidTripShape {
        index: usize,
        reason: String,
        raw: String,
    },

    /// Voting was attempted before any trips were recommended.
    #[error("there are no recommended trips to vote on")]
    NoActiveBallot,

    /// A vote referenced a trip number outside the current list.
    #[error("trip number {ordinal} is out of range, choose between 1 and {count}")]
    OutOfRange { ordinal: usize, count: usize },

    /// A vote referenced a trip name that is not on the ballot.
    #[error("trip '{0}' is not among the current recommendations")]
    UnknownTrip(String),

    /// Finalize was requested before any vote was cast.
    #[error("no votes have been cast for this session")]
    NoVotesCast,

    /// Itinerary generation produced no text.
    #[error("itinerary generation produced an empty response")]
    EmptyItinerary,

    /// The session store failed.
    #[error("session storage error: {0}")]
    Storage(String),
}

impl TripPlanningError {
    /// Creates a malformed response error carrying the raw AI text.
    pub fn malformed(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        TripPlanningError::MalformedResponse {
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    /// Creates an invalid trip shape error carrying the raw AI text.
    pub fn invalid_trip(index: usize, reason: impl Into<String>, raw: impl Into<String>) -> Self {
        TripPlanningError::InvalidTripShape {
            index,
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    /// Creates an upstream error.
    pub fn upstream(message: impl Into<String>) -> Self {
        TripPlanningError::Upstream(message.into())
    }

    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            TripPlanningError::InvalidPreference(_) => "INVALID_PREFERENCE",
            TripPlanningError::NoPreferences => "NO_PREFERENCES",
            TripPlanningError::Upstream(_) => "UPSTREAM_ERROR",
            TripPlanningError::MalformedResponse { .. } => "MALFORMED_RESPONSE",
            TripPlanningError::InvalidTripShape { .. } => "INVALID_TRIP_SHAPE",
            TripPlanningError::NoActiveBallot => "NO_ACTIVE_BALLOT",
            TripPlanningError::OutOfRange { .. } => "OUT_OF_RANGE",
            TripPlanningError::UnknownTrip(_) => "UNKNOWN_TRIP",
            TripPlanningError::NoVotesCast => "NO_VOTES_CAST",
            TripPlanningError::EmptyItinerary => "EMPTY_ITINERARY",
            TripPlanningError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// The unparsable AI text, when the error carries one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            TripPlanningError::MalformedResponse { raw, .. }
            | TripPlanningError::InvalidTripShape { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_trip_shape_reports_one_based_position() {
        let err = TripPlanningError::invalid_trip(0, "missing field `name`", "[]");
        assert_eq!(
            err.to_string(),
            "AI trip option 1 is invalid: missing field `name`"
        );
    }

    #[test]
    fn out_of_range_message_names_bounds() {
        let err = TripPlanningError::OutOfRange { ordinal: 5, count: 3 };
        assert_eq!(
            err.to_string(),
            "trip number 5 is out of range, choose between 1 and 3"
        );
    }

    #[test]
    fn raw_response_only_for_decode_failures() {
        let err = TripPlanningError::malformed("expected value", "not json");
        assert_eq!(err.raw_response(), Some("not json"));
        assert_eq!(err.code(), "MALFORMED_RESPONSE");

        assert_eq!(TripPlanningError::NoVotesCast.raw_response(), None);
    }

    #[test]
    fn validation_error_converts_to_invalid_preference() {
        let err: TripPlanningError = ValidationError::empty_field("location").into();
        assert!(matches!(err, TripPlanningError::InvalidPreference(_)));
        assert_eq!(err.code(), "INVALID_PREFERENCE");
    }
}
