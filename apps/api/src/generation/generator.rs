//! Story write-up generation: orchestrates retrieval and the LLM call.
//!
//! Flow: build base prompt from submission → retrieve top-K examples →
//!       augment prompt → TextGenerator::complete → return write-up.
//!
//! Retrieval never blocks generation. An empty corpus produces the plain base prompt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::prompts::{WRITEUP_PROMPT_TEMPLATE, WRITEUP_SYSTEM};
use crate::llm_client::prompts::{FACTUALITY_INSTRUCTION, PROSE_ONLY_INSTRUCTION};
use crate::llm_client::TextGenerator;
use crate::retrieval::augment::PromptCost;
use crate::retrieval::submission::Submission;
use crate::retrieval::StoryRetriever;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Request body for write-up generation.
#[derive(Debug, Clone, Deserialize)]
pub struct WriteupRequest {
    pub submission: Submission,
    pub top_k: Option<usize>,
}

/// Response from the generation pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct WriteupResponse {
    pub writeup_id: Uuid,
    pub writeup: String,
    /// Examples retrieved for the prompt, best first.
    pub reference_example_ids: Vec<String>,
    pub prompt_cost: PromptCost,
    pub generated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Generates a write-up for a story submission.
pub async fn generate_writeup(
    retriever: &StoryRetriever,
    generator: &dyn TextGenerator,
    request: WriteupRequest,
) -> Result<WriteupResponse, AppError> {
    if request.submission.is_blank() {
        return Err(AppError::Validation(
            "submission must contain at least one non-empty text field".to_string(),
        ));
    }

    let base_prompt = build_base_prompt(&request.submission);

    // CPU-only and bounded by corpus size; no need to leave the async task
    let examples = retriever.retrieve(&request.submission, request.top_k);
    let (prompt, prompt_cost) = retriever.augment_prompt_with_cost(&base_prompt, &examples);
    info!(
        "Generating write-up with {} reference example(s), ~{} prompt tokens",
        examples.len(),
        prompt_cost.augmented_tokens
    );

    let writeup = generator
        .complete(&prompt, WRITEUP_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Write-up generation failed: {e}")))?;

    Ok(WriteupResponse {
        writeup_id: Uuid::new_v4(),
        writeup,
        reference_example_ids: examples.into_iter().map(|e| e.id).collect(),
        prompt_cost,
        generated_at: Utc::now(),
    })
}

/// Fills the base write-up template with the submission's non-empty fields.
pub fn build_base_prompt(submission: &Submission) -> String {
    let submission_fields = submission
        .text_fields()
        .map(|(name, value)| format!("{}: {}", humanize_field(name), value.trim()))
        .collect::<Vec<_>>()
        .join("\n");

    WRITEUP_PROMPT_TEMPLATE
        .replace("{factuality_instruction}", FACTUALITY_INSTRUCTION)
        .replace("{prose_instruction}", PROSE_ONLY_INSTRUCTION)
        .replace("{submission_fields}", &submission_fields)
}

/// `caseForChange` / `case_for_change` → `Case for change`.
fn humanize_field(name: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for c in name.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else if c.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
            current.extend(c.to_lowercase());
        } else {
            current.extend(c.to_lowercase());
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    let joined = words.join(" ");
    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
