//! Keyword extraction: which vocabulary phrases does a piece of text mention?
//!
//! Pure substring membership over the configured vocabulary. No tokenization,
//! no counting.

use crate::retrieval::vocabulary::Vocabulary;

/// Returns the vocabulary phrases contained in `text`, in vocabulary order,
/// each at most once. Matching is case-insensitive.
pub fn extract_keywords(text: &str, vocabulary: &Vocabulary) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let text = text.to_lowercase();
    let mut found: Vec<String> = Vec::new();
    for phrase in &vocabulary.phrases {
        let phrase = phrase.to_lowercase();
        if !phrase.is_empty() && text.contains(&phrase) && !found.contains(&phrase) {
            found.push(phrase);
        }
    }
    found
}
