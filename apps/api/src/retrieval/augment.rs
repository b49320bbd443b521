//! Prompt augmentation: append retrieved reference write-ups and style
//! instructions to a base generation prompt.
//!
//! Only the first two ranked examples are rendered. The top example's
//! structure drives the closing instructions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::retrieval::corpus::Example;
use crate::retrieval::prompts::{
    CLOSING_INSTRUCTIONS_TEMPLATE, ELLIPSIS, FALLBACK_SECTIONS, FALLBACK_STYLE, FALLBACK_TONE,
    PLACEHOLDER_SECTIONS, PLACEHOLDER_STYLE, PLACEHOLDER_THEME, PLACEHOLDER_TONE,
    REFERENCE_EXAMPLE_TEMPLATE, REFERENCE_HEADER, SECTION_SEPARATOR,
};

/// Maximum number of examples rendered into the prompt.
pub const MAX_RENDERED_EXAMPLES: usize = 2;
/// Write-up characters kept per example excerpt.
pub const SNIPPET_CHARS: usize = 300;
/// Rough characters-per-token ratio for cost estimates.
const CHARS_PER_TOKEN: usize = 4;

/// Advisory token cost of an augmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptCost {
    pub base_tokens: usize,
    pub augmented_tokens: usize,
    pub added_tokens: usize,
}

impl PromptCost {
    pub fn measure(base_prompt: &str, augmented_prompt: &str) -> Self {
        let base_tokens = estimate_tokens(base_prompt);
        let augmented_tokens = estimate_tokens(augmented_prompt);
        Self {
            base_tokens,
            augmented_tokens,
            added_tokens: augmented_tokens.saturating_sub(base_tokens),
        }
    }
}

/// Estimated token count: characters / 4.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / CHARS_PER_TOKEN
}

/// Appends reference examples and closing instructions to `base_prompt`.
///
/// With no examples the base prompt is returned unchanged.
pub fn augment_prompt(base_prompt: &str, examples: &[Example], organization: &str) -> String {
    let Some(top) = examples.first() else {
        return base_prompt.to_string();
    };

    let rendered: Vec<String> = examples
        .iter()
        .take(MAX_RENDERED_EXAMPLES)
        .enumerate()
        .map(|(i, example)| render_example(i + 1, example))
        .collect();

    let augmented = format!(
        "{base_prompt}\n\n{REFERENCE_HEADER}\n\n{}\n\n{}",
        rendered.join("\n\n"),
        closing_instructions(top, organization)
    );

    let cost = PromptCost::measure(base_prompt, &augmented);
    debug!(
        "Prompt augmented with {} example(s): ~{} → ~{} tokens (+{})",
        rendered.len(),
        cost.base_tokens,
        cost.augmented_tokens,
        cost.added_tokens
    );

    augmented
}

/// First `SNIPPET_CHARS` characters of the write-up, newlines collapsed to spaces.
pub fn snippet(writeup: &str) -> String {
    writeup
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .chars()
        .take(SNIPPET_CHARS)
        .collect()
}

fn render_example(index: usize, example: &Example) -> String {
    let structure = &example.structure;
    let sections = if structure.sections.is_empty() {
        PLACEHOLDER_SECTIONS.to_string()
    } else {
        structure.sections.join(SECTION_SEPARATOR)
    };

    fill_template(
        REFERENCE_EXAMPLE_TEMPLATE,
        &[
            ("index", &index.to_string()),
            ("title", &example.title),
            ("theme", non_blank(example.theme.as_deref(), PLACEHOLDER_THEME)),
            ("sections", &sections),
            ("style", non_blank(structure.style.as_deref(), PLACEHOLDER_STYLE)),
            ("tone", non_blank(structure.tone.as_deref(), PLACEHOLDER_TONE)),
            ("snippet", &format!("{}{ELLIPSIS}", snippet(&example.writeup))),
        ],
    )
}

fn closing_instructions(top: &Example, organization: &str) -> String {
    let structure = &top.structure;
    let sections = if structure.sections.is_empty() {
        FALLBACK_SECTIONS.to_string()
    } else {
        structure.sections.join(", ")
    };

    fill_template(
        CLOSING_INSTRUCTIONS_TEMPLATE,
        &[
            ("style", non_blank(structure.style.as_deref(), FALLBACK_STYLE)),
            ("tone", non_blank(structure.tone.as_deref(), FALLBACK_TONE)),
            ("sections", &sections),
            ("organization", organization),
        ],
    )
}

/// Substitutes `{name}` placeholders in a single left-to-right pass.
///
/// Inserted values are never rescanned, so corpus text containing braces is
/// copied through as-is. Unknown `{...}` sequences in the template stay literal.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let hit = values.iter().find_map(|(name, value)| {
            tail.strip_prefix(*name)
                .and_then(|after| after.strip_prefix('}'))
                .map(|after| (*value, after))
        });
        match hit {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

fn non_blank<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(fallback)
}
