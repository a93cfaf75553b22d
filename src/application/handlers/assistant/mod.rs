//! Free-form travel assistant handlers.

mod ask_assistant;

pub use ask_assistant::{AskAssistantCommand, AskAssistantHandler, AssistantReply};
