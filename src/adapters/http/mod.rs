//! HTTP adapters - REST API implementations.

pub mod game;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

pub use game::{game_routes, GameHandlers};

/// Assembles the full API router: game endpoints under `/game` plus a
/// liveness probe.
pub fn api_router(handlers: GameHandlers) -> Router {
    Router::new()
        .nest("/game", game_routes(handlers))
        .route("/health", get(health))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}
