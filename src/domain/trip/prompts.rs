//! Prompt templates sent to the completion API.

use super::option::TripOption;
use super::preference::PreferenceRecord;

/// System prompt used when none is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

const RECOMMENDATION_PREAMBLE: &str = "Based on the following travel preferences, suggest a few \
trip options that balance everyone's inputs. Make sure the activity list is descriptive.";

const RECOMMENDATION_FORMAT: &str = r#"Respond with ONLY a raw JSON array of trip options in exactly this shape:
[{"name": "Trip Name", "dates": "Trip Dates", "trip_style": "Trip Style", "budget": "Budget", "activities": ["Activity 1", "Activity 2", "Activity 3"]}]
Every trip must have a different name. Do not add any text before or after the array and do not wrap it in code fences."#;

const ITINERARY_PREAMBLE: &str = "Generate a detailed and descriptive travel itinerary for the \
following trip. Ensure a daily schedule based on the details provided.";

const ASSISTANT_FORMAT: &str = r#"Please provide the response as a JSON object with the following structure:
{"recommended_trip": "Your trip recommendation text here", "location": "Recommended location name", "points_of_interest": [{"name": "POI Name", "type": "POI Type", "latitude": 0.0, "longitude": 0.0}]}
Ensure the location name is accurate for geocoding and include relevant points of interest with coordinates if possible."#;

/// Builds the prompt asking for trip options that balance every preference.
///
/// One line per preference, in submission order.
pub fn recommendation_prompt(preferences: &[PreferenceRecord]) -> String {
    let mut prompt = String::from(RECOMMENDATION_PREAMBLE);
    prompt.push('\n');
    for preference in preferences {
        prompt.push_str(&preference.prompt_line());
        prompt.push('\n');
    }
    prompt.push('\n');
    prompt.push_str(RECOMMENDATION_FORMAT);
    prompt
}

/// Builds the prompt expanding a chosen trip into a daily itinerary.
pub fn itinerary_prompt(trip: &TripOption) -> String {
    let mut details = format!(
        "Name: {}\nDates: {}\nTrip style: {}\nBudget: {}\nActivities:",
        trip.name, trip.dates, trip.trip_style, trip.budget
    );
    for activity in &trip.activities {
        details.push_str("\n  * ");
        details.push_str(activity);
    }

    format!("{}\nTrip Details:\n{}", ITINERARY_PREAMBLE, details)
}

/// Wraps a free-form traveller question with the structured reply directive.
pub fn assistant_prompt(message: &str) -> String {
    format!("{}\n\n{}", message.trim(), ASSISTANT_FORMAT)
}
