// Story write-up generation.
// Implements: base prompt assembly, retrieval-augmented prompting, LLM write-up call.
// All LLM calls go through llm_client::TextGenerator; no direct API calls here.

pub mod generator;
pub mod handlers;
pub mod prompts;
