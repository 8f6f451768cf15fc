// src/routes/mod.rs
pub mod chat;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::{chat_handler, health_handler};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}
