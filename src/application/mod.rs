//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers mutate a session under its lock; query handlers only read.

pub mod handlers;
mod llm_gateway;

pub use handlers::*;
pub use llm_gateway::LlmGateway;
