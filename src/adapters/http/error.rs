//! Error bodies and status mapping shared by every HTTP route.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::trip::TripPlanningError;
use crate::ports::LookupError;

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource_type, id))
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Status code for a workflow error.
pub fn planning_status(error: &TripPlanningError) -> StatusCode {
    match error {
        TripPlanningError::InvalidPreference(_)
        | TripPlanningError::OutOfRange { .. }
        | TripPlanningError::UnknownTrip(_) => StatusCode::BAD_REQUEST,
        TripPlanningError::NoPreferences
        | TripPlanningError::NoActiveBallot
        | TripPlanningError::NoVotesCast => StatusCode::CONFLICT,
        TripPlanningError::Upstream(_)
        | TripPlanningError::MalformedResponse { .. }
        | TripPlanningError::InvalidTripShape { .. }
        | TripPlanningError::EmptyItinerary => StatusCode::BAD_GATEWAY,
        TripPlanningError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps a workflow error to a response. Unparsable AI text goes in `details`.
pub fn handle_planning_error(error: TripPlanningError) -> Response {
    let status = planning_status(&error);
    if status.is_server_error() {
        tracing::warn!(code = error.code(), error = %error, "Trip planning request failed");
    }

    let mut body = ErrorResponse::new(error.code(), error.to_string());
    if let TripPlanningError::InvalidPreference(validation) = &error {
        body = body.with_details(serde_json::json!({ "field": validation.field() }));
    }
    if let Some(raw) = error.raw_response() {
        body = body.with_details(serde_json::json!({ "raw_response": raw }));
    }
    (status, Json(body)).into_response()
}

/// Maps a place lookup failure to a response.
pub fn handle_lookup_error(error: LookupError) -> Response {
    let (status, code) = match &error {
        LookupError::NotConfigured(_) => (StatusCode::SERVICE_UNAVAILABLE, "NOT_CONFIGURED"),
        LookupError::Network { .. } | LookupError::Status { .. } | LookupError::Parse { .. } => {
            (StatusCode::BAD_GATEWAY, "LOOKUP_FAILED")
        }
    };
    tracing::warn!(error = %error, "Place lookup failed");
    (status, Json(ErrorResponse::new(code, error.to_string()))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ValidationError;

    #[test]
    fn workflow_errors_map_to_statuses() {
        let cases = [
            (
                TripPlanningError::InvalidPreference(ValidationError::empty_field("dates")),
                StatusCode::BAD_REQUEST,
            ),
            (TripPlanningError::NoPreferences, StatusCode::CONFLICT),
            (TripPlanningError::upstream("down"), StatusCode::BAD_GATEWAY),
            (
                TripPlanningError::malformed("eof", "oops"),
                StatusCode::BAD_GATEWAY,
            ),
            (TripPlanningError::NoActiveBallot, StatusCode::CONFLICT),
            (
                TripPlanningError::OutOfRange { ordinal: 9, count: 3 },
                StatusCode::BAD_REQUEST,
            ),
            (TripPlanningError::NoVotesCast, StatusCode::CONFLICT),
            (TripPlanningError::EmptyItinerary, StatusCode::BAD_GATEWAY),
            (
                TripPlanningError::Storage("gone".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(planning_status(&error), status, "{:?}", error);
        }
    }

    #[test]
    fn error_response_omits_empty_details() {
        let json = serde_json::to_value(ErrorResponse::bad_request("nope")).unwrap();
        assert_eq!(json, serde_json::json!({"code": "BAD_REQUEST", "message": "nope"}));
    }

    #[test]
    fn not_found_names_resource() {
        let error = ErrorResponse::not_found("Session", "42");
        assert_eq!(error.code, "NOT_FOUND");
        assert_eq!(error.message, "Session not found: 42");
    }
}
