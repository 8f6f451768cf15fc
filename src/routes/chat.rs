use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::info;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, HealthResponse},
    services::relay::relay_message,
    state::SharedState,
};

pub const HEALTH_STATUS: &str = "MAXIM AI with Groq is running! 🚀";

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTH_STATUS.to_string(),
    })
}

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    // An unreadable body counts as a missing message.
    let payload = payload.map(|Json(p)| p).unwrap_or_default();

    let trimmed = payload.message.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("No message provided".to_string()));
    }

    info!("📨 Received: {}", trimmed);

    let outcome = relay_message(&state.upstream, trimmed).await;
    Ok(Json(outcome.into_response()))
}
