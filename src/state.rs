//! Application state wiring all services together.
//!
//! AppState holds the handler sets used by the HTTP routes and the chat
//! socket. Every handler shares one session store and one LLM gateway.

use std::sync::Arc;

use crate::adapters::chat::TripBot;
use crate::adapters::http::{AssistantAppState, ChatSocketState, PlanningHandlers};
use crate::application::LlmGateway;
use crate::config::ChatConfig;
use crate::ports::{AIProvider, PlaceLookup, SessionStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<LlmGateway>,
    pub planning: PlanningHandlers,
    pub assistant: AssistantAppState,
    pub chat: ChatSocketState,
}

impl AppState {
    /// Wires handlers over the given provider, lookup and store.
    ///
    /// `system_prompt` overrides the built-in travel assistant prompt.
    pub fn new(
        provider: Arc<dyn AIProvider>,
        lookup: Arc<dyn PlaceLookup>,
        store: Arc<dyn SessionStore>,
        system_prompt: Option<&str>,
        chat: ChatConfig,
    ) -> Self {
        let mut gateway = LlmGateway::new(provider);
        if let Some(prompt) = system_prompt {
            gateway = gateway.with_system_prompt(prompt);
        }
        let gateway = Arc::new(gateway);

        let bot = TripBot::new(chat, store.clone(), gateway.clone());
        Self {
            planning: PlanningHandlers::new(store, gateway.clone()),
            assistant: AssistantAppState::new(gateway.clone(), lookup),
            chat: ChatSocketState::new(Arc::new(bot)),
            gateway,
        }
    }
}
