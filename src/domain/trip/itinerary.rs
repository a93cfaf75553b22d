//! Itinerary text post-processing.

use once_cell::sync::Lazy;
use regex::Regex;

use super::errors::TripPlanningError;

/// Hard cap on a single chat message.
pub const CHAT_MESSAGE_LIMIT: usize = 2000;

/// Chunk size used for chat replies, leaving headroom under the cap.
pub const CHAT_CHUNK_CHARS: usize = 1900;

static BLANK_LINE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\r?\n){3,}").expect("static regex is valid"));

/// Collapses runs of three or more newlines into one and trims the result.
///
/// # Errors
///
/// Returns `EmptyItinerary` if nothing is left.
pub fn tidy_itinerary(raw: &str) -> Result<String, TripPlanningError> {
    let collapsed = BLANK_LINE_RUNS.replace_all(raw, "\n");
    let trimmed = collapsed.trim();
    if trimmed.is_empty() {
        return Err(TripPlanningError::EmptyItinerary);
    }
    Ok(trimmed.to_string())
}

/// Splits text into chunks of at most `max_chars` characters.
///
/// Order is preserved and nothing is dropped; boundaries may fall mid-word.
/// Counts characters, not bytes, so multi-byte text never splits inside a
/// code point.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for c in text.chars() {
        if count == max_chars {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(c);
        count += 1;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
