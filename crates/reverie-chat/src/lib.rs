#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod http_client;
mod memory;
mod prompt;
mod provider;
mod server;
mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{delete, post},
};
use jiff::Timestamp;
use serde::Deserialize;

pub use error::{ChatError, Result};
pub use memory::{ConversationHistory, ConversationStore};
pub use server::{ChatServerBuilder, Server};
pub use types::{ChatEntry, ChatRequest, ChatResponse, DEFAULT_USER, Role};

/// Build the chat server from configuration, if the capability is enabled
pub fn build_server(config: &reverie_config::Config) -> anyhow::Result<Option<Arc<Server>>> {
    let Some(ref chat_config) = config.chat else {
        return Ok(None);
    };

    let server = Arc::new(
        ChatServerBuilder::new(chat_config)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to initialize chat server: {e}"))?,
    );
    Ok(Some(server))
}

/// Create the endpoint router for chat
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new()
        .route("/api/v1/chat", post(chat))
        .route("/api/v1/chat/history", delete(clear_history))
}

/// Handle chat requests
async fn chat(State(server): State<Arc<Server>>, Json(request): Json<ChatRequest>) -> Result<Json<ChatResponse>> {
    let user_id = request.user_id.as_deref().unwrap_or(DEFAULT_USER);

    tracing::debug!(user = %user_id, chars = request.message.len(), "chat request received");

    let response = server.reply(user_id, &request.message).await?;

    Ok(Json(ChatResponse {
        response,
        timestamp: Timestamp::now(),
    }))
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    #[serde(default)]
    user_id: Option<String>,
}

/// Forget a user's conversation history
async fn clear_history(State(server): State<Arc<Server>>, Query(query): Query<HistoryQuery>) -> http::StatusCode {
    let user_id = query.user_id.as_deref().unwrap_or(DEFAULT_USER);

    tracing::debug!(user = %user_id, "clearing conversation history");
    server.store().clear(user_id);

    http::StatusCode::NO_CONTENT
}
