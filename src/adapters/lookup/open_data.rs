//! Open-data place lookups over HTTP.
//!
//! Nominatim and Overpass are keyless and ask clients to identify
//! themselves with a User-Agent. OpenWeatherMap needs an API key; without
//! one, weather lookups fail with `NotConfigured` instead of calling out.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::ports::{Coordinates, LookupError, PlaceLookup};

const NOMINATIM: &str = "nominatim";
const OVERPASS: &str = "overpass";
const OPENWEATHERMAP: &str = "openweathermap";

/// Endpoints and credentials for the open-data services.
#[derive(Debug, Clone)]
pub struct OpenDataConfig {
    pub nominatim_url: String,
    pub overpass_url: String,
    pub openweathermap_url: String,
    pub openweathermap_api_key: Option<Secret<String>>,
    pub user_agent: String,
}

impl Default for OpenDataConfig {
    fn default() -> Self {
        Self {
            nominatim_url: "https://nominatim.openstreetmap.org/search".to_string(),
            overpass_url: "https://overpass-api.de/api/interpreter".to_string(),
            openweathermap_url: "https://api.openweathermap.org/data/2.5/weather".to_string(),
            openweathermap_api_key: None,
            user_agent: "TravelAIApp/1.0".to_string(),
        }
    }
}

/// [`PlaceLookup`] backed by OpenStreetMap services and OpenWeatherMap.
pub struct OpenDataLookup {
    config: OpenDataConfig,
    client: Client,
}

impl OpenDataLookup {
    pub fn new(config: OpenDataConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| LookupError::Network {
                service: NOMINATIM,
                message: format!("Failed to create HTTP client: {}", e),
            })?;
        Ok(Self { config, client })
    }

    async fn read_json<T: DeserializeOwned>(
        service: &'static str,
        sent: Result<Response, reqwest::Error>,
    ) -> Result<T, LookupError> {
        let response = sent.map_err(|e| LookupError::Network {
            service,
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                service,
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| LookupError::Parse {
            service,
            message: e.to_string(),
        })
    }
}

/// Overpass QL for tourism nodes within `radius_m` of a point.
fn overpass_query(near: Coordinates, radius_m: u32) -> String {
    format!(
        "[out:json];node[\"tourism\"](around:{},{},{});out;",
        radius_m, near.latitude, near.longitude
    )
}

/// Nominatim returns coordinates as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimPlace {
    fn coordinates(&self) -> Result<Coordinates, LookupError> {
        let parse = |raw: &str| {
            raw.parse::<f64>().map_err(|e| LookupError::Parse {
                service: NOMINATIM,
                message: format!("bad coordinate '{}': {}", raw, e),
            })
        };
        Ok(Coordinates::new(parse(&self.lat)?, parse(&self.lon)?))
    }
}

#[async_trait]
impl PlaceLookup for OpenDataLookup {
    async fn geocode(&self, location: &str) -> Result<Option<Coordinates>, LookupError> {
        let sent = self
            .client
            .get(&self.config.nominatim_url)
            .query(&[("q", location), ("format", "json"), ("limit", "1")])
            .send()
            .await;

        let places: Vec<NominatimPlace> = Self::read_json(NOMINATIM, sent).await?;
        places.first().map(NominatimPlace::coordinates).transpose()
    }

    async fn points_of_interest(
        &self,
        near: Coordinates,
        radius_m: u32,
    ) -> Result<serde_json::Value, LookupError> {
        let query = overpass_query(near, radius_m);
        let sent = self
            .client
            .get(&self.config.overpass_url)
            .query(&[("data", query.as_str())])
            .send()
            .await;

        Self::read_json(OVERPASS, sent).await
    }

    async fn current_weather(&self, at: Coordinates) -> Result<serde_json::Value, LookupError> {
        let api_key = self
            .config
            .openweathermap_api_key
            .as_ref()
            .ok_or(LookupError::NotConfigured("openweathermap_api_key"))?;

        let sent = self
            .client
            .get(&self.config.openweathermap_url)
            .query(&[
                ("lat", at.latitude.to_string()),
                ("lon", at.longitude.to_string()),
                ("appid", api_key.expose_secret().clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await;

        Self::read_json(OPENWEATHERMAP, sent).await
    }
}
