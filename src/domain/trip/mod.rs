//! Trip planning domain.
//!
//! A session collects travel preferences from several people, asks the AI
//! for trip options that balance them, lets the group vote, and expands the
//! winning option into a day-by-day itinerary.

mod ballot;
mod errors;
mod itinerary;
mod option;
mod preference;
mod prompts;
mod sanitizer;
mod session;

pub use ballot::{Ballot, TallyEntry};
pub use errors::TripPlanningError;
pub use itinerary::{chunk_text, tidy_itinerary, CHAT_CHUNK_CHARS, CHAT_MESSAGE_LIMIT};
pub use option::TripOption;
pub use preference::PreferenceRecord;
pub use prompts::{
    assistant_prompt, itinerary_prompt, recommendation_prompt, DEFAULT_SYSTEM_PROMPT,
};
pub use sanitizer::{parse_json, sanitize};
pub use session::{TripSession, VoteReceipt};
