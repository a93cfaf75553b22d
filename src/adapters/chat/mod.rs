//! Chat command front end.
//!
//! Transport-agnostic: a transport hands each incoming line to
//! [`TripBot::respond`] together with the group and author, and sends back
//! every returned chunk as a separate message. The websocket transport lives
//! in `adapters::http::chat_ws`.

mod bot;
mod capabilities;
mod commands;

pub use bot::{ChatContext, TripBot};
pub use capabilities::Command;
pub use commands::{parse_input, ChatInput, CommandArgsError};
