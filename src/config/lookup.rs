//! Place lookup configuration

use secrecy::Secret;
use serde::Deserialize;

use super::ai::is_http_url;
use super::error::ValidationError;
use crate::adapters::lookup::OpenDataConfig;

/// Endpoints for geocoding, points of interest and weather
#[derive(Debug, Clone, Deserialize)]
pub struct LookupConfig {
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,

    #[serde(default = "default_overpass_url")]
    pub overpass_url: String,

    #[serde(default = "default_openweathermap_url")]
    pub openweathermap_url: String,

    /// Weather lookups are disabled without it
    pub openweathermap_api_key: Option<String>,

    /// Sent on every request; the OpenStreetMap services require one
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl LookupConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, url) in [
            ("lookup.nominatim_url", &self.nominatim_url),
            ("lookup.overpass_url", &self.overpass_url),
            ("lookup.openweathermap_url", &self.openweathermap_url),
        ] {
            if !is_http_url(url) {
                return Err(ValidationError::InvalidUrl { field });
            }
        }
        if self.user_agent.trim().is_empty() {
            return Err(ValidationError::MissingRequired("TRIPVOTE__LOOKUP__USER_AGENT"));
        }
        Ok(())
    }

    /// Adapter settings, with the API key moved behind `Secret`.
    pub fn to_open_data_config(&self) -> OpenDataConfig {
        OpenDataConfig {
            nominatim_url: self.nominatim_url.clone(),
            overpass_url: self.overpass_url.clone(),
            openweathermap_url: self.openweathermap_url.clone(),
            openweathermap_api_key: self
                .openweathermap_api_key
                .as_ref()
                .filter(|k| !k.trim().is_empty())
                .map(|k| Secret::new(k.clone())),
            user_agent: self.user_agent.clone(),
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            nominatim_url: default_nominatim_url(),
            overpass_url: default_overpass_url(),
            openweathermap_url: default_openweathermap_url(),
            openweathermap_api_key: None,
            user_agent: default_user_agent(),
        }
    }
}

fn default_nominatim_url() -> String {
    OpenDataConfig::default().nominatim_url
}

fn default_overpass_url() -> String {
    OpenDataConfig::default().overpass_url
}

fn default_openweathermap_url() -> String {
    OpenDataConfig::default().openweathermap_url
}

fn default_user_agent() -> String {
    OpenDataConfig::default().user_agent
}
