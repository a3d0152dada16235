//! HTTP routes for game endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    complete_session, create_session, get_dilemma_stats, get_session, record_choice, GameHandlers,
};

/// Creates the game router with all endpoints.
pub fn game_routes(handlers: GameHandlers) -> Router {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/:id", get(get_session))
        .route("/sessions/:id/choices", post(record_choice))
        .route("/sessions/:id/complete", post(complete_session))
        .route("/stats/:dilemma_id", get(get_dilemma_stats))
        .with_state(handlers)
}
