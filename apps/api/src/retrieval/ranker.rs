use serde::{Deserialize, Serialize};

use crate::retrieval::corpus::Example;
use crate::retrieval::scoring::{
    score, score_profile, ScoreBreakdown, ScoringWeights, SubmissionProfile,
};
use crate::retrieval::submission::Submission;
use crate::retrieval::vocabulary::Vocabulary;

/// Number of examples retrieved when the caller does not ask for a specific count.
pub const DEFAULT_TOP_K: usize = 2;

/// An example paired with its relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredExample {
    pub example: Example,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Scores every example and returns the best `top_k`, highest first.
///
/// Ties keep corpus order: `sort_by` is stable.
pub fn rank_scored(
    submission: &Submission,
    examples: &[Example],
    vocabulary: &Vocabulary,
    top_k: usize,
) -> Vec<ScoredExample> {
    let weights = ScoringWeights::default();
    let profile = SubmissionProfile::build(submission, vocabulary);

    let mut scored: Vec<ScoredExample> = examples
        .iter()
        .map(|example| {
            let breakdown = score_profile(&profile, example, vocabulary, &weights);
            ScoredExample {
                example: example.clone(),
                score: breakdown.total,
                breakdown,
            }
        })
        .collect();

    sort_descending(&mut scored, |s| s.score);
    scored.truncate(top_k);
    scored
}

/// The best `top_k` examples by [`score`], highest first. Ties keep corpus order.
pub fn rank(
    submission: &Submission,
    examples: &[Example],
    vocabulary: &Vocabulary,
    top_k: usize,
) -> Vec<Example> {
    let mut scored: Vec<(&Example, f64)> = examples
        .iter()
        .map(|example| (example, score(submission, example, vocabulary)))
        .collect();

    sort_descending(&mut scored, |(_, s)| *s);
    scored
        .into_iter()
        .take(top_k)
        .map(|(example, _)| example.clone())
        .collect()
}

// Sort descending; equal scores stay in corpus order
fn sort_descending<T>(items: &mut [T], score_of: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| {
        score_of(b)
            .partial_cmp(&score_of(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
