//! WebSocket transport for the chat bot.
//!
//! One connection speaks for one user in one group. Every text frame is a
//! chat line; every reply chunk goes back as its own text frame.
//!
//! # Connection Flow
//! 1. Client connects to `/ws/chat?group=<id>&user=<name>`
//! 2. Each text frame is handed to [`TripBot::respond`]
//! 3. Reply chunks are sent in order, one frame per chunk
//! 4. Close frame or socket error ends the connection

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use crate::adapters::chat::{ChatContext, TripBot};
use crate::domain::foundation::SessionKey;

use super::error::ErrorResponse;

const DEFAULT_USER: &str = "guest";

/// State required for chat socket handling.
#[derive(Clone)]
pub struct ChatSocketState {
    pub bot: Arc<TripBot>,
}

impl ChatSocketState {
    pub fn new(bot: Arc<TripBot>) -> Self {
        Self { bot }
    }
}

/// Query parameters for the socket upgrade.
#[derive(Debug, Deserialize)]
pub struct ChatConnectParams {
    /// Group whose planning session this connection joins.
    pub group: String,
    /// Display name used for preferences and votes.
    #[serde(default)]
    pub user: Option<String>,
}

/// Creates the chat socket router.
pub fn chat_socket_routes(state: ChatSocketState) -> Router {
    Router::new()
        .route("/ws/chat", get(chat_ws_handler))
        .with_state(state)
}

/// Handle WebSocket upgrade for the chat bot.
///
/// Route: `GET /ws/chat`
pub async fn chat_ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<ChatConnectParams>,
    State(state): State<ChatSocketState>,
) -> Response {
    let session_key = match SessionKey::new(params.group) {
        Ok(key) => key,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("group cannot be empty")),
            )
                .into_response();
        }
    };
    let user = params
        .user
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| DEFAULT_USER.to_string());

    let ctx = ChatContext { session_key, user };
    ws.on_upgrade(move |socket| handle_chat_socket(socket, ctx, state))
}

/// Handle an established chat connection.
async fn handle_chat_socket(socket: WebSocket, ctx: ChatContext, state: ChatSocketState) {
    let (mut sender, mut receiver) = socket.split();

    tracing::info!(
        session = %ctx.session_key,
        user = %ctx.user,
        "Chat connection established"
    );

    while let Some(result) = receiver.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let replies = state.bot.respond(&ctx, &text).await;
                if send_replies(&mut sender, replies).await.is_err() {
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                tracing::debug!(session = %ctx.session_key, "Client closed connection");
                break;
            }
            Ok(Message::Ping(data)) => {
                if sender.send(Message::Pong(data)).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(session = %ctx.session_key, "WebSocket error: {}", e);
                break;
            }
        }
    }

    tracing::info!(
        session = %ctx.session_key,
        user = %ctx.user,
        "Chat connection closed"
    );
}

async fn send_replies<S>(sender: &mut S, replies: Vec<String>) -> Result<(), S::Error>
where
    S: SinkExt<Message> + Unpin,
{
    for chunk in replies {
        sender.send(Message::Text(chunk)).await?;
    }
    Ok(())
}
