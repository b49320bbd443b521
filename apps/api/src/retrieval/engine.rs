//! `StoryRetriever`: the call surface used by handlers and the write-up generator.
//!
//! Every call takes its own corpus snapshot, so concurrent requests and a
//! reload in flight never interfere. Scoring holds no shared mutable state.

use std::sync::Arc;

use tracing::{debug, info};

use crate::retrieval::augment::{augment_prompt, PromptCost};
use crate::retrieval::corpus::{Corpus, CorpusHandle, Example};
use crate::retrieval::ranker::{rank, rank_scored, ScoredExample, DEFAULT_TOP_K};
use crate::retrieval::submission::Submission;
use crate::retrieval::vocabulary::Vocabulary;

pub struct StoryRetriever {
    corpus: CorpusHandle,
    vocabulary: Vocabulary,
    organization: String,
    default_top_k: usize,
}

impl StoryRetriever {
    pub fn new(
        corpus: CorpusHandle,
        vocabulary: Vocabulary,
        organization: impl Into<String>,
    ) -> Self {
        Self {
            corpus,
            vocabulary: vocabulary.normalized(),
            organization: organization.into(),
            default_top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_default_top_k(mut self, top_k: usize) -> Self {
        self.default_top_k = top_k;
        self
    }

    pub fn default_top_k(&self) -> usize {
        self.default_top_k
    }

    /// The most relevant examples for `submission`, highest first.
    pub fn retrieve(&self, submission: &Submission, top_k: Option<usize>) -> Vec<Example> {
        let Some(corpus) = self.searchable_corpus() else {
            return Vec::new();
        };
        let top_k = top_k.unwrap_or(self.default_top_k);

        let ranked = rank(submission, corpus.examples(), &self.vocabulary, top_k);
        debug!(
            "Retrieved {} of {} examples: {:?}",
            ranked.len(),
            corpus.len(),
            ranked.iter().map(|e| e.id.as_str()).collect::<Vec<_>>()
        );
        ranked
    }

    /// Like [`retrieve`](Self::retrieve), keeping each example's score breakdown.
    pub fn retrieve_scored(
        &self,
        submission: &Submission,
        top_k: Option<usize>,
    ) -> Vec<ScoredExample> {
        let Some(corpus) = self.searchable_corpus() else {
            return Vec::new();
        };
        let top_k = top_k.unwrap_or(self.default_top_k);

        let ranked = rank_scored(submission, corpus.examples(), &self.vocabulary, top_k);
        debug!(
            "Retrieved {} of {} examples: {:?}",
            ranked.len(),
            corpus.len(),
            ranked
                .iter()
                .map(|s| (s.example.id.as_str(), s.score))
                .collect::<Vec<_>>()
        );
        ranked
    }

    /// Appends `examples` to `base_prompt`. Identity when `examples` is empty.
    pub fn augment_prompt(&self, base_prompt: &str, examples: &[Example]) -> String {
        augment_prompt(base_prompt, examples, &self.organization)
    }

    /// Augments and reports the advisory token cost alongside the prompt.
    pub fn augment_prompt_with_cost(
        &self,
        base_prompt: &str,
        examples: &[Example],
    ) -> (String, PromptCost) {
        let augmented = self.augment_prompt(base_prompt, examples);
        let cost = PromptCost::measure(base_prompt, &augmented);
        (augmented, cost)
    }

    pub fn corpus(&self) -> Arc<Corpus> {
        self.corpus.snapshot()
    }

    pub fn corpus_handle(&self) -> &CorpusHandle {
        &self.corpus
    }

    /// Rebuilds the corpus from its source and swaps it in.
    pub fn reload(&self) -> Arc<Corpus> {
        self.corpus.reload()
    }

    #[cfg(test)]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Current snapshot, or `None` when there is nothing to rank.
    fn searchable_corpus(&self) -> Option<Arc<Corpus>> {
        let corpus = self.corpus.snapshot();
        if corpus.is_empty() {
            info!("Reference corpus is empty; retrieval contributes no examples");
            return None;
        }
        Some(corpus)
    }
}
