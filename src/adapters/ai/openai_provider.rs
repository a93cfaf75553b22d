//! OpenAI-compatible Provider - Implementation of AIProvider for any
//! `/chat/completions` endpoint speaking the OpenAI wire format.
//!
//! The default endpoint is Mistral's hosted API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("mistral-large-latest")
//!     .with_base_url("https://api.mistral.ai/v1");
//!
//! let provider = OpenAIProvider::new(config)?;
//! ```
//!
//! Failures are reported once; callers decide what to do with them.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, MessageRole,
    ProviderInfo, ResponseFormat, TokenUsage,
};

/// Default base URL of the hosted completion API.
pub const DEFAULT_BASE_URL: &str = "https://api.mistral.ai/v1";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "mistral-large-latest";

/// Configuration for the OpenAI-compatible provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API, without the `/chat/completions` suffix.
    pub base_url: String,
    /// Request timeout. `None` waits as long as the server does.
    pub timeout: Option<Duration>,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI-compatible API provider implementation.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Creates a new provider with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Converts our request to the wire format.
    fn to_openai_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        let mut messages = Vec::new();

        if let Some(ref prompt) = request.system_prompt {
            messages.push(OpenAIMessage {
                role: "system".to_string(),
                content: prompt.clone(),
            });
        }

        for msg in &request.messages {
            messages.push(OpenAIMessage {
                role: match msg.role {
                    MessageRole::System => "system",
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                }
                .to_string(),
                content: msg.content.clone(),
            });
        }

        OpenAIRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            response_format: match request.response_format {
                ResponseFormat::Text => None,
                ResponseFormat::JsonObject => Some(OpenAIResponseFormat {
                    kind: "json_object",
                }),
            },
        }
    }

    /// Sends a request.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let openai_request = self.to_openai_request(request);

        self.client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.map(|t| t.as_secs()).unwrap_or(0),
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(Self::status_error(status.as_u16(), error_body))
    }

    /// Maps a non-success status to an error.
    fn status_error(status: u16, error_body: String) -> AIError {
        match status {
            401 | 403 => AIError::AuthenticationFailed,
            429 => AIError::RateLimited,
            400 | 422 => AIError::InvalidRequest(error_body),
            500..=599 => AIError::unavailable(format!("Server error {}: {}", status, error_body)),
            _ => AIError::network(format!("Unexpected status {}: {}", status, error_body)),
        }
    }

    /// Parses a completion response.
    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = Self::handle_response_status(response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| AIError::network(format!("Failed to read response: {}", e)))?;

        Self::decode_body(&body, &self.config.model)
    }

    /// Decodes a response body, taking the first choice.
    fn decode_body(body: &str, fallback_model: &str) -> Result<CompletionResponse, AIError> {
        let openai_response: OpenAIResponse = serde_json::from_str(body)
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or(AIError::NoChoices)?;

        let usage = openai_response
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            usage,
            model: openai_response
                .model
                .unwrap_or_else(|| fallback_model.to_string()),
            finish_reason: FinishReason::from_api(choice.finish_reason.as_deref()),
        })
    }
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send_request(&request).await?;
        self.parse_response(response).await
    }

    fn provider_info(&self) -> ProviderInfo {
        let name = if self.config.base_url.contains("mistral.ai") {
            "mistral"
        } else {
            "openai-compatible"
        };
        ProviderInfo::new(name, &self.config.model).with_json_mode(true)
    }
}

// ----- Wire Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<OpenAIResponseFormat>,
}

#[derive(Debug, Serialize)]
struct OpenAIResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    model: Option<String>,
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIReplyMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIReplyMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RequestMetadata;

    fn provider() -> OpenAIProvider {
        OpenAIProvider::new(OpenAIConfig::new("test-key")).unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = OpenAIConfig::new("test-key")
            .with_model("open-mistral-7b")
            .with_base_url("https://custom.api.com/v1/")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.model, "open-mistral-7b");
        assert_eq!(config.base_url, "https://custom.api.com/v1");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn config_defaults_to_mistral_without_timeout() {
        let config = OpenAIConfig::new("k");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn request_carries_system_and_user_messages() {
        let request = CompletionRequest::new(RequestMetadata::new("test"))
            .with_system_prompt("You are a helpful assistant.")
            .with_message(MessageRole::User, "Plan a trip");

        let wire = serde_json::to_value(provider().to_openai_request(&request)).unwrap();

        assert_eq!(wire["model"], DEFAULT_MODEL);
        assert_eq!(wire["messages"][0]["role"], "system");
        assert_eq!(wire["messages"][0]["content"], "You are a helpful assistant.");
        assert_eq!(wire["messages"][1]["role"], "user");
        assert_eq!(wire["messages"][1]["content"], "Plan a trip");
        assert!(wire.get("response_format").is_none());
        assert!(wire.get("max_tokens").is_none());
    }

    #[test]
    fn json_mode_sets_response_format() {
        let request = CompletionRequest::new(RequestMetadata::new("test"))
            .with_message(MessageRole::User, "List trips")
            .with_response_format(ResponseFormat::JsonObject);

        let wire = serde_json::to_value(provider().to_openai_request(&request)).unwrap();
        assert_eq!(wire["response_format"]["type"], "json_object");
    }

    #[test]
    fn decodes_first_choice() {
        let body = r#"{
            "model": "mistral-large-2407",
            "choices": [
                {"message": {"role": "assistant", "content": "first"}, "finish_reason": "stop"},
                {"message": {"role": "assistant", "content": "second"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 12, "completion_tokens": 8, "total_tokens": 20}
        }"#;

        let response = OpenAIProvider::decode_body(body, DEFAULT_MODEL).unwrap();
        assert_eq!(response.content, "first");
        assert_eq!(response.model, "mistral-large-2407");
        assert_eq!(response.usage.total_tokens, 20);
        assert_eq!(response.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn zero_choices_is_an_error() {
        let body = r#"{"model": "m", "choices": []}"#;
        assert_eq!(
            OpenAIProvider::decode_body(body, DEFAULT_MODEL).unwrap_err(),
            AIError::NoChoices
        );
    }

    #[test]
    fn garbage_body_is_a_parse_error() {
        let err = OpenAIProvider::decode_body("<html>", DEFAULT_MODEL).unwrap_err();
        assert!(matches!(err, AIError::Parse(_)));
    }

    #[test]
    fn status_codes_map_to_errors() {
        assert_eq!(
            OpenAIProvider::status_error(401, String::new()),
            AIError::AuthenticationFailed
        );
        assert_eq!(
            OpenAIProvider::status_error(429, String::new()),
            AIError::RateLimited
        );
        assert!(matches!(
            OpenAIProvider::status_error(400, "bad".to_string()),
            AIError::InvalidRequest(body) if body == "bad"
        ));
        assert!(matches!(
            OpenAIProvider::status_error(503, String::new()),
            AIError::Unavailable { .. }
        ));
    }

    #[test]
    fn provider_info_names_mistral() {
        let info = provider().provider_info();
        assert_eq!(info.name, "mistral");
        assert_eq!(info.model, DEFAULT_MODEL);
        assert!(info.supports_json_mode);

        let other = OpenAIProvider::new(
            OpenAIConfig::new("k").with_base_url("http://localhost:8000/v1"),
        )
        .unwrap();
        assert_eq!(other.provider_info().name, "openai-compatible");
    }
}
