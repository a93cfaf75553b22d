//! HTTP adapters - REST and WebSocket endpoints.
//!
//! - `planning` - group planning sessions under `/api/sessions`
//! - `assistant` - travel assistant and place lookups under `/api`
//! - `chat_ws` - chat bot transport at `/ws/chat`

pub mod assistant;
pub mod chat_ws;
pub mod error;
pub mod planning;
mod router;

pub use assistant::{assistant_routes, AssistantAppState};
pub use chat_ws::{chat_socket_routes, ChatSocketState};
pub use error::ErrorResponse;
pub use planning::{planning_routes, PlanningHandlers};
pub use router::build_router;
