//! HTTP adapter for the travel assistant and place lookups.

mod dto;
mod handlers;
mod routes;

pub use dto::{ChatRequest, ChatResponse, GeocodeQuery, GeocodeResponse, WeatherQuery};
pub use handlers::AssistantAppState;
pub use routes::assistant_routes;
