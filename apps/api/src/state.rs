use std::sync::Arc;

use crate::llm_client::TextGenerator;
use crate::retrieval::StoryRetriever;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Retrieval engine. Immutable apart from whole-corpus swaps on reload.
    pub retriever: Arc<StoryRetriever>,
    /// Pluggable text generator. Default: the Anthropic `LlmClient`.
    pub generator: Arc<dyn TextGenerator>,
}
