// Prompt fragments appended by the augmentor.
// Placeholders in `{braces}` are replaced before use.

/// Header of the reference block. Follows the caller's base prompt.
pub const REFERENCE_HEADER: &str = "\
REFERENCE EXAMPLES
The following published write-ups show the house style expected for this story. \
Use them for structure, voice and pacing only. Do NOT copy their facts, figures or names.";

/// One rendered reference example.
/// Replace: {index}, {title}, {theme}, {sections}, {style}, {tone}, {snippet}
pub const REFERENCE_EXAMPLE_TEMPLATE: &str = "\
Example {index}: {title}
Theme: {theme}
Structure: {sections}
Style: {style} | Tone: {tone}
Excerpt: {snippet}";

/// Closing instructions driven by the top-ranked example.
/// Replace: {style}, {tone}, {sections}, {organization}
pub const CLOSING_INSTRUCTIONS_TEMPLATE: &str = "\
WRITING INSTRUCTIONS
- Match the reference examples above: {style} style, {tone} tone.
- Follow this section structure: {sections}.
- Keep every fact from the story submission; take only structure and voice from the references.
- Preserve {organization}'s communication standards.";

/// Shown when a reference example carries no value for a field.
pub const PLACEHOLDER_THEME: &str = "general";
pub const PLACEHOLDER_SECTIONS: &str = "not specified";
pub const PLACEHOLDER_STYLE: &str = "not specified";
pub const PLACEHOLDER_TONE: &str = "not specified";

/// Used in the closing instructions when the top example has no value.
pub const FALLBACK_STYLE: &str = "narrative";
pub const FALLBACK_TONE: &str = "professional";
pub const FALLBACK_SECTIONS: &str = "introduction, body, conclusion";

pub const SECTION_SEPARATOR: &str = " → ";
pub const ELLIPSIS: &str = "...";
