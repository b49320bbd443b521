pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::retrieval::handlers as retrieval;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Retrieval API
        .route("/api/v1/examples", get(retrieval::handle_list_examples))
        .route(
            "/api/v1/examples/reload",
            post(retrieval::handle_reload_examples),
        )
        .route("/api/v1/examples/retrieve", post(retrieval::handle_retrieve))
        .route("/api/v1/prompts/augment", post(retrieval::handle_augment))
        // Generation API
        .route(
            "/api/v1/stories/writeup",
            post(generation::handle_generate_writeup),
        )
        .with_state(state)
}
