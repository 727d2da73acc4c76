//! ATS Scorer — keyword overlap between two texts, scaled to 0–100.
//!
//! Denominator is the query side: `|A ∩ B| / |A|`. The score answers "how much
//! of A does B cover", so `score(a, b)` and `score(b, a)` generally differ.

use std::sync::Arc;

use crate::ats::{AtsConfig, Normalizer, TokenSet};

const LOW_SCORE_SUGGESTION: &str =
    "Consider adding more relevant keywords based on the job description.";
const HIGH_SCORE_SUGGESTION: &str = "Your resume is well optimized.";

/// Pure scoring over a shared `Normalizer`. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AtsScorer {
    normalizer: Normalizer,
}

impl AtsScorer {
    pub fn new(config: Arc<AtsConfig>) -> Self {
        Self {
            normalizer: Normalizer::new(config),
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Overlap score of `text_b` against the keywords of `text_a`.
    pub fn score(&self, text_a: &str, text_b: &str) -> u32 {
        let tokens_a = self.normalizer.normalize(text_a);
        let tokens_b = self.normalizer.normalize(text_b);
        overlap_score(&tokens_a, &tokens_b)
    }

    /// Keywords of `want` that `have` lacks, in lexical order.
    pub fn missing_keywords(&self, have: &str, want: &str) -> Vec<String> {
        let have = self.normalizer.normalize(have);
        let want = self.normalizer.normalize(want);
        missing_keywords(&have, &want)
    }

    pub fn suggestion(&self, score: u32) -> &'static str {
        if score < self.normalizer.config().suggestion_threshold {
            LOW_SCORE_SUGGESTION
        } else {
            HIGH_SCORE_SUGGESTION
        }
    }
}

/// `|a ∩ b| / |a| × 100`, rounded. An empty `a` scores 0.
pub fn overlap_score(a: &TokenSet, b: &TokenSet) -> u32 {
    if a.is_empty() {
        return 0;
    }
    let shared = a.intersection(b).count();
    ((shared as f64 / a.len() as f64) * 100.0).round() as u32
}

/// Set difference `want − have`.
pub fn missing_keywords(have: &TokenSet, want: &TokenSet) -> Vec<String> {
    want.difference(have).cloned().collect()
}
