//! Parsing of chat lines into commands and their arguments.

use super::capabilities::Command;

/// What a chat line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput<'a> {
    /// Nothing but whitespace.
    Empty,
    /// A known command with its (trimmed, possibly empty) argument text.
    Command { command: Command, args: &'a str },
    /// Prefixed, but no such command.
    Unknown { name: &'a str },
    /// Anything else, for the assistant.
    Text(&'a str),
}

/// Splits a line into command name and arguments when it starts with `prefix`.
pub fn parse_input<'a>(line: &'a str, prefix: &str) -> ChatInput<'a> {
    let line = line.trim();
    if line.is_empty() {
        return ChatInput::Empty;
    }

    let Some(rest) = line.strip_prefix(prefix) else {
        return ChatInput::Text(line);
    };

    let (name, args) = match rest.find(char::is_whitespace) {
        Some(at) => (&rest[..at], rest[at..].trim()),
        None => (rest, ""),
    };

    match Command::from_name(name) {
        Some(command) => ChatInput::Command { command, args },
        None => ChatInput::Unknown { name },
    }
}

/// Bad arguments to a known command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandArgsError {
    #[error("expected 4 fields separated by ';' (location; budget; dates; mode), got {0}")]
    PreferenceFieldCount(usize),

    #[error("'{0}' is not a trip number")]
    NotANumber(String),

    #[error("missing trip number")]
    MissingNumber,
}

/// Location, budget, dates and mode, in that order.
pub type PreferenceFields<'a> = [&'a str; 4];

/// Splits `!prefs` arguments on `;`.
///
/// Field content is validated later by the preference handler.
pub fn parse_preference_args(args: &str) -> Result<PreferenceFields<'_>, CommandArgsError> {
    let parts: Vec<&str> = args.split(';').map(str::trim).collect();
    match parts.as_slice() {
        [location, budget, dates, mode] => Ok([*location, *budget, *dates, *mode]),
        _ if args.trim().is_empty() => Err(CommandArgsError::PreferenceFieldCount(0)),
        _ => Err(CommandArgsError::PreferenceFieldCount(parts.len())),
    }
}

/// Parses the `!vote` argument. Range is checked against the ballot later.
pub fn parse_vote_args(args: &str) -> Result<usize, CommandArgsError> {
    let raw = args.split_whitespace().next().ok_or(CommandArgsError::MissingNumber)?;
    raw.trim_start_matches('#')
        .parse()
        .map_err(|_| CommandArgsError::NotANumber(raw.to_string()))
}
