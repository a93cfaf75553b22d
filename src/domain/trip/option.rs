//! AI-proposed trip option and batch decoding.

use serde::{Deserialize, Deserializer, Serialize};

use super::errors::TripPlanningError;
use super::sanitizer::parse_json;

/// One trip the AI proposed for the group.
///
/// Only produced by [`TripOption::decode_batch`]; the name doubles as the
/// vote key and is unique within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripOption {
    pub name: String,
    pub dates: String,
    pub trip_style: String,
    #[serde(deserialize_with = "text_or_number")]
    pub budget: String,
    pub activities: Vec<String>,
}

impl TripOption {
    /// Decodes a raw AI reply into a complete batch of trip options.
    ///
    /// The reply is fence-stripped, parsed as JSON and must be a non-empty
    /// array. Every element must carry all five fields; a single bad element
    /// rejects the whole batch. Repeated names get a ` (n)` suffix so each
    /// option keeps its own vote counter.
    ///
    /// # Errors
    ///
    /// - `MalformedResponse` if the reply is not JSON or not an array
    /// - `InvalidTripShape` if the array is empty or an element is incomplete
    pub fn decode_batch(raw: &str) -> Result<Vec<TripOption>, TripPlanningError> {
        let value = parse_json(raw)?;

        let elements = match value {
            serde_json::Value::Array(elements) => elements,
            other => {
                return Err(TripPlanningError::malformed(
                    format!("expected a JSON array, got {}", json_kind(&other)),
                    raw,
                ))
            }
        };

        if elements.is_empty() {
            return Err(TripPlanningError::invalid_trip(
                0,
                "the AI returned no trip options",
                raw,
            ));
        }

        let mut trips = Vec::with_capacity(elements.len());
        for (index, element) in elements.into_iter().enumerate() {
            if !element.is_object() {
                return Err(TripPlanningError::invalid_trip(
                    index,
                    format!("expected an object, got {}", json_kind(&element)),
                    raw,
                ));
            }

            let trip: TripOption = serde_json::from_value(element)
                .map_err(|e| TripPlanningError::invalid_trip(index, e.to_string(), raw))?;

            if trip.name.trim().is_empty() {
                return Err(TripPlanningError::invalid_trip(index, "name is empty", raw));
            }
            trips.push(trip);
        }

        disambiguate_names(&mut trips);
        Ok(trips)
    }
}

fn disambiguate_names(trips: &mut [TripOption]) {
    let mut seen: Vec<String> = Vec::with_capacity(trips.len());

    for trip in trips.iter_mut() {
        if seen.contains(&trip.name) {
            let mut suffix = 2;
            let mut candidate = format!("{} ({})", trip.name, suffix);
            while seen.contains(&candidate) {
                suffix += 1;
                candidate = format!("{} ({})", trip.name, suffix);
            }
            tracing::debug!(original = %trip.name, renamed = %candidate, "Duplicate trip name");
            trip.name = candidate;
        }
        seen.push(trip.name.clone());
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(text) => text,
        TextOrNumber::Number(number) => number.to_string(),
    })
}
