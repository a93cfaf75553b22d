//! Chat front end configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::trip::{CHAT_CHUNK_CHARS, CHAT_MESSAGE_LIMIT};

/// Chat command layer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Prefix that marks a message as a command
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,

    /// Which command set is enabled
    #[serde(default)]
    pub capabilities: CapabilityProfile,

    /// Maximum characters per outgoing message
    #[serde(default = "default_chunk_chars")]
    pub chunk_chars: usize,
}

/// Command sets, from smallest to largest.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityProfile {
    /// Ping, group recommendations and free-text chat
    Minimal,
    /// Minimal plus preference submission and listing
    Classic,
    /// Classic plus voting and itinerary finalization
    #[default]
    Full,
}

impl ChatConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.command_prefix.is_empty() || self.command_prefix.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidCommandPrefix);
        }
        if self.chunk_chars == 0 || self.chunk_chars > CHAT_MESSAGE_LIMIT {
            return Err(ValidationError::InvalidChunkSize {
                max: CHAT_MESSAGE_LIMIT,
            });
        }
        Ok(())
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            command_prefix: default_command_prefix(),
            capabilities: CapabilityProfile::default(),
            chunk_chars: default_chunk_chars(),
        }
    }
}

fn default_command_prefix() -> String {
    "!".to_string()
}

fn default_chunk_chars() -> usize {
    CHAT_CHUNK_CHARS
}
