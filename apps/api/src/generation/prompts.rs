// Prompt constants for story write-up generation.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for write-up generation.
pub const WRITEUP_SYSTEM: &str = "You are a corporate communications writer. \
    You turn employee story submissions into polished internal write-ups \
    that read like the organization's published success stories.";

/// Base write-up prompt. Retrieved reference examples are appended after it.
/// Replace: {factuality_instruction}, {prose_instruction}, {submission_fields}
pub const WRITEUP_PROMPT_TEMPLATE: &str = r#"Write a story write-up from the submission below.

{factuality_instruction}

{prose_instruction}

STORY SUBMISSION:
{submission_fields}"#;
