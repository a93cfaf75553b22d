//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// API key for the completion endpoint
    pub api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// System prompt override
    pub system_prompt: Option<String>,

    /// Request timeout in seconds; unset waits as long as the provider does
    pub timeout_secs: Option<u64>,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("TRIPVOTE__AI__API_KEY"));
        }
        if !is_http_url(&self.base_url) {
            return Err(ValidationError::InvalidUrl {
                field: "ai.base_url",
            });
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("TRIPVOTE__AI__MODEL"));
        }
        if self.timeout_secs == Some(0) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            system_prompt: None,
            timeout_secs: None,
        }
    }
}

pub(super) fn is_http_url(raw: &str) -> bool {
    raw.starts_with("http://") || raw.starts_with("https://")
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key() -> AiConfig {
        AiConfig {
            api_key: Some("mistral-key".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.base_url, "https://api.mistral.ai/v1");
        assert_eq!(config.model, "mistral-large-latest");
        assert!(config.timeout().is_none());
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: Some(45),
            ..with_key()
        };
        assert_eq!(config.timeout(), Some(Duration::from_secs(45)));
    }

    #[test]
    fn test_validation_missing_key() {
        assert_eq!(
            AiConfig::default().validate(),
            Err(ValidationError::MissingRequired("TRIPVOTE__AI__API_KEY"))
        );
        let blank = AiConfig {
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_validation_bad_url() {
        let config = AiConfig {
            base_url: "api.mistral.ai".to_string(),
            ..with_key()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidUrl {
                field: "ai.base_url"
            })
        );
    }

    #[test]
    fn test_validation_ok() {
        assert!(with_key().validate().is_ok());
    }
}
