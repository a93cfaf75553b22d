//! LlmGateway - the single path from workflow handlers to the AI provider.
//!
//! Builds the system + user exchange, optionally asks for JSON output and
//! hands back the raw reply text. Provider failures surface as
//! `TripPlanningError::Upstream` and are never retried here.

use std::sync::Arc;

use crate::domain::foundation::SessionKey;
use crate::domain::trip::{TripPlanningError, DEFAULT_SYSTEM_PROMPT};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, MessageRole, ProviderInfo, RequestMetadata,
    ResponseFormat,
};

impl From<AIError> for TripPlanningError {
    fn from(err: AIError) -> Self {
        TripPlanningError::Upstream(err.to_string())
    }
}

/// Wraps an [`AIProvider`] with the planner's system prompt.
#[derive(Clone)]
pub struct LlmGateway {
    provider: Arc<dyn AIProvider>,
    system_prompt: String,
}

impl LlmGateway {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self {
            provider,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Replaces the default system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn provider_info(&self) -> ProviderInfo {
        self.provider.provider_info()
    }

    /// Sends `user_prompt` under the configured system prompt.
    pub async fn complete(
        &self,
        operation: &'static str,
        session: Option<&SessionKey>,
        user_prompt: &str,
        want_json: bool,
    ) -> Result<String, TripPlanningError> {
        self.complete_with_system(operation, session, &self.system_prompt, user_prompt, want_json)
            .await
    }

    /// Sends one system message and one user message and returns the text
    /// of the first choice.
    pub async fn complete_with_system(
        &self,
        operation: &'static str,
        session: Option<&SessionKey>,
        system_prompt: &str,
        user_prompt: &str,
        want_json: bool,
    ) -> Result<String, TripPlanningError> {
        let mut metadata = RequestMetadata::new(operation);
        if let Some(key) = session {
            metadata = metadata.with_session(key.clone());
        }
        let trace_id = metadata.trace_id.clone();

        let format = if want_json {
            ResponseFormat::JsonObject
        } else {
            ResponseFormat::Text
        };
        let request = CompletionRequest::new(metadata)
            .with_system_prompt(system_prompt)
            .with_message(MessageRole::User, user_prompt)
            .with_response_format(format);

        tracing::debug!(
            operation,
            trace_id = %trace_id,
            prompt_chars = user_prompt.chars().count(),
            want_json,
            "Sending completion request"
        );

        match self.provider.complete(request).await {
            Ok(response) => {
                tracing::info!(
                    operation,
                    trace_id = %trace_id,
                    model = %response.model,
                    prompt_tokens = response.usage.prompt_tokens,
                    completion_tokens = response.usage.completion_tokens,
                    finish_reason = ?response.finish_reason,
                    "Completion received"
                );
                Ok(response.content)
            }
            Err(err) => {
                tracing::warn!(operation, trace_id = %trace_id, error = %err, "Completion failed");
                Err(err.into())
            }
        }
    }
}
