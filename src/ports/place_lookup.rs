//! Place Lookup Port - Geocoding, points of interest and weather.
//!
//! These are read-only services used by the presentation layer to enrich
//! answers. The recommendation workflow never calls them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Errors from external lookup services.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// A required setting (usually an API key) is missing.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// The request never completed.
    #[error("{service} request failed: {message}")]
    Network {
        service: &'static str,
        message: String,
    },

    /// The service answered with a non-success status.
    #[error("{service} returned status {status}")]
    Status { service: &'static str, status: u16 },

    /// The service answered with a body that could not be decoded.
    #[error("{service} response could not be parsed: {message}")]
    Parse {
        service: &'static str,
        message: String,
    },
}

/// Port for map and weather lookups.
#[async_trait]
pub trait PlaceLookup: Send + Sync {
    /// Resolve a free-text location to coordinates.
    ///
    /// `Ok(None)` when the service knows no such place.
    async fn geocode(&self, location: &str) -> Result<Option<Coordinates>, LookupError>;

    /// Tourism points of interest around a point, as returned by the service.
    async fn points_of_interest(
        &self,
        near: Coordinates,
        radius_m: u32,
    ) -> Result<serde_json::Value, LookupError>;

    /// Current weather at a point, as returned by the service.
    async fn current_weather(&self, at: Coordinates) -> Result<serde_json::Value, LookupError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_error_messages_name_the_service() {
        let err = LookupError::Status {
            service: "nominatim",
            status: 503,
        };
        assert_eq!(err.to_string(), "nominatim returned status 503");

        let err = LookupError::NotConfigured("openweathermap_api_key");
        assert_eq!(err.to_string(), "openweathermap_api_key is not configured");
    }
}
