//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TRIPVOTE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use tripvote::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod ai;
mod chat;
mod error;
mod lookup;
mod server;

pub use ai::AiConfig;
pub use chat::{CapabilityProfile, ChatConfig};
pub use error::{ConfigError, ValidationError};
pub use lookup::LookupConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Unprefixed variables still honoured as fallbacks, for `.env` files
/// written for earlier deployments.
const LEGACY_ENV: [(&str, &str); 2] = [
    ("ai.api_key", "MISTRAL_API_KEY"),
    ("lookup.openweathermap_api_key", "OPENWEATHERMAP_API_KEY"),
];

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Completion API configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Geocoding, points of interest and weather endpoints
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Chat command layer
    #[serde(default)]
    pub chat: ChatConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Seeds defaults from the legacy unprefixed API key variables
    /// 3. Reads environment variables with `TRIPVOTE` prefix
    /// 4. Uses `__` (double underscore) to separate nested values
    /// 5. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TRIPVOTE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `TRIPVOTE__AI__API_KEY=...` -> `ai.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        for (key, variable) in LEGACY_ENV {
            if let Ok(value) = std::env::var(variable) {
                builder = builder.set_default(key, value)?;
            }
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("TRIPVOTE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.lookup.validate()?;
        self.chat.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
