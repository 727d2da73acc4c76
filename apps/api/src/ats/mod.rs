//! ATS scoring — keyword-overlap heuristic between two texts.
//!
//! `Normalizer` turns raw text into tokens; `AtsScorer` compares token sets.
//! Both read their stopword list and knobs from an immutable `AtsConfig`
//! built once at startup and shared through `AppState`.

pub mod normalizer;
pub mod scorer;
pub mod stopwords;

use std::collections::{BTreeSet, HashSet};

pub use normalizer::Normalizer;
pub use scorer::AtsScorer;

/// A set of normalized tokens. Ordered so serialized output is stable.
pub type TokenSet = BTreeSet<String>;

/// Score below which the résumé suggestion asks for more keywords.
pub const DEFAULT_SUGGESTION_THRESHOLD: u32 = 50;
/// Number of job-description keywords used to build the job search query.
pub const DEFAULT_QUERY_KEYWORD_COUNT: usize = 5;

/// Process-wide scoring configuration. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct AtsConfig {
    pub stopwords: HashSet<String>,
    pub query_keyword_count: usize,
    pub suggestion_threshold: u32,
}

impl AtsConfig {
    /// English stopwords plus any caller-supplied extras (lower-cased).
    pub fn with_extra_stopwords<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        config.stopwords.extend(
            extra
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty()),
        );
        config
    }
}

impl Default for AtsConfig {
    fn default() -> Self {
        Self {
            stopwords: stopwords::ENGLISH.iter().map(|s| s.to_string()).collect(),
            query_keyword_count: DEFAULT_QUERY_KEYWORD_COUNT,
            suggestion_threshold: DEFAULT_SUGGESTION_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_contains_common_stopwords() {
        let config = AtsConfig::default();
        for word in ["the", "and", "with", "of"] {
            assert!(config.stopwords.contains(word), "missing stopword {word}");
        }
        assert_eq!(config.query_keyword_count, 5);
        assert_eq!(config.suggestion_threshold, 50);
    }

    #[test]
    fn test_extra_stopwords_are_trimmed_and_lowercased() {
        let config = AtsConfig::with_extra_stopwords([" Experience ", "", "TEAM"]);
        assert!(config.stopwords.contains("experience"));
        assert!(config.stopwords.contains("team"));
        assert!(!config.stopwords.contains(""));
        assert!(config.stopwords.contains("the"));
    }
}
