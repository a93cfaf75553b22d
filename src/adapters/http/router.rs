//! Axum router configuration with middleware.
//!
//! Middleware: CORS, request tracing, and an optional request timeout.

use std::sync::Arc;

use axum::{extract::State, http::HeaderValue, routing::get, Json, Router};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::application::LlmGateway;
use crate::config::ServerConfig;
use crate::ports::ProviderInfo;
use crate::state::AppState;

use super::assistant::assistant_routes;
use super::chat_ws::chat_socket_routes;
use super::planning::planning_routes;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: ProviderInfo,
}

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let api_routes = Router::new()
        .nest("/sessions", planning_routes(state.planning.clone()))
        .merge(assistant_routes(state.assistant.clone()));

    let mut router = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check).with_state(state.gateway.clone()))
        .nest("/api", api_routes)
        .merge(chat_socket_routes(state.chat.clone()))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http());

    if let Some(timeout) = server.request_timeout() {
        router = router.layer(TimeoutLayer::new(timeout));
    }
    router
}

/// Any origin when none or `*` is configured, otherwise the listed ones.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(allowed))
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Tripvote backend is running!",
    })
}

async fn health_check(State(gateway): State<Arc<LlmGateway>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        provider: gateway.provider_info(),
    })
}
