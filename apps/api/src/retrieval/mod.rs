// Example retrieval and prompt augmentation.
// Implements: corpus loading, keyword extraction, similarity scoring, top-K ranking,
// prompt augmentation. Pure and synchronous once the corpus is loaded; no LLM calls here.

pub mod augment;
pub mod corpus;
pub mod engine;
pub mod handlers;
pub mod keywords;
pub mod prompts;
pub mod ranker;
pub mod scoring;
pub mod submission;
pub mod vocabulary;

pub use engine::StoryRetriever;
