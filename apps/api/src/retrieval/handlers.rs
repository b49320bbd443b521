//! Axum route handlers for the retrieval API.

use std::sync::Arc;

use anyhow::anyhow;
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::retrieval::augment::PromptCost;
use crate::retrieval::ranker::ScoredExample;
use crate::retrieval::submission::Submission;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ExampleSummary {
    pub id: String,
    pub title: String,
    pub theme: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CorpusResponse {
    pub count: usize,
    pub loaded_at: DateTime<Utc>,
    pub source: Option<String>,
    pub examples: Vec<ExampleSummary>,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub count: usize,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RetrieveRequest {
    #[serde(default)]
    pub submission: Submission,
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RetrieveResponse {
    pub examples: Vec<ScoredExample>,
}

#[derive(Debug, Deserialize)]
pub struct AugmentRequest {
    pub base_prompt: String,
    #[serde(default)]
    pub submission: Submission,
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct AugmentResponse {
    pub prompt: String,
    pub example_ids: Vec<String>,
    pub cost: PromptCost,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/examples
pub async fn handle_list_examples(State(state): State<AppState>) -> Json<CorpusResponse> {
    let corpus = state.retriever.corpus();
    Json(CorpusResponse {
        count: corpus.len(),
        loaded_at: corpus.loaded_at(),
        source: state
            .retriever
            .corpus_handle()
            .source()
            .map(|p| p.display().to_string()),
        examples: corpus
            .examples()
            .iter()
            .map(|e| ExampleSummary {
                id: e.id.clone(),
                title: e.title.clone(),
                theme: e.theme.clone(),
            })
            .collect(),
    })
}

/// POST /api/v1/examples/reload
///
/// Re-reads the corpus source off the async runtime and swaps it in whole.
pub async fn handle_reload_examples(
    State(state): State<AppState>,
) -> Result<Json<ReloadResponse>, AppError> {
    let retriever = Arc::clone(&state.retriever);
    let corpus = tokio::task::spawn_blocking(move || retriever.reload())
        .await
        .map_err(|e| AppError::Internal(anyhow!("Corpus reload task failed: {e}")))?;

    info!("Corpus reload via API: {} examples", corpus.len());
    Ok(Json(ReloadResponse {
        count: corpus.len(),
        loaded_at: corpus.loaded_at(),
    }))
}

/// POST /api/v1/examples/retrieve
///
/// Ranks the corpus against a submission and returns scored examples, best first.
pub async fn handle_retrieve(
    State(state): State<AppState>,
    Json(request): Json<RetrieveRequest>,
) -> Json<RetrieveResponse> {
    let examples = state
        .retriever
        .retrieve_scored(&request.submission, request.top_k);
    Json(RetrieveResponse { examples })
}

/// POST /api/v1/prompts/augment
///
/// Retrieves examples for the submission and appends them to `base_prompt`.
pub async fn handle_augment(
    State(state): State<AppState>,
    Json(request): Json<AugmentRequest>,
) -> Result<Json<AugmentResponse>, AppError> {
    if request.base_prompt.trim().is_empty() {
        return Err(AppError::Validation(
            "base_prompt cannot be empty".to_string(),
        ));
    }

    let examples = state.retriever.retrieve(&request.submission, request.top_k);
    let (prompt, cost) = state
        .retriever
        .augment_prompt_with_cost(&request.base_prompt, &examples);

    Ok(Json(AugmentResponse {
        prompt,
        example_ids: examples.into_iter().map(|e| e.id).collect(),
        cost,
    }))
}
