//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::generation::generator::{generate_writeup, WriteupRequest, WriteupResponse};
use crate::state::AppState;

/// POST /api/v1/stories/writeup
///
/// Retrieves reference examples for the submission, augments the prompt and
/// returns the generated write-up. Works with an empty corpus.
pub async fn handle_generate_writeup(
    State(state): State<AppState>,
    Json(request): Json<WriteupRequest>,
) -> Result<Json<WriteupResponse>, AppError> {
    let response =
        generate_writeup(&state.retriever, state.generator.as_ref(), request).await?;
    Ok(Json(response))
}
