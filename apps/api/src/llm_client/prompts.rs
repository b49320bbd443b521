// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments only.

/// Appended to every generation prompt: the model may only restate what the submitter wrote.
pub const FACTUALITY_INSTRUCTION: &str = "\
    CRITICAL: Every claim in the write-up must come from the story submission. \
    Do NOT invent figures, names, dates or outcomes. \
    If the submission does not support a claim, leave it out.";

/// Output format for plain-prose completions.
pub const PROSE_ONLY_INSTRUCTION: &str = "\
    Respond with the write-up text only. \
    Do NOT add a preamble, headings in markdown, or closing remarks about the task.";
