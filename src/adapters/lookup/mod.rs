//! Place Lookup Adapters
//!
//! - **OpenDataLookup** - Nominatim geocoding, Overpass points of interest,
//!   OpenWeatherMap current weather

mod open_data;

pub use open_data::{OpenDataConfig, OpenDataLookup};
