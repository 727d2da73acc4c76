//! Text Normalizer — raw text → normalized keyword tokens.

use std::collections::HashMap;
use std::sync::Arc;

use crate::ats::{AtsConfig, TokenSet};

/// Lower-cases text, splits it on non-alphanumeric characters and drops
/// stopwords and empty tokens.
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: Arc<AtsConfig>,
}

impl Normalizer {
    pub fn new(config: Arc<AtsConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AtsConfig {
        &self.config
    }

    /// Ordered token stream in emission order, duplicates kept.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .filter(|t| !self.config.stopwords.contains(*t))
            .map(str::to_string)
            .collect()
    }

    /// Unique normalized tokens of `text`. Empty input yields an empty set.
    pub fn normalize(&self, text: &str) -> TokenSet {
        self.tokens(text).into_iter().collect()
    }

    /// Space-joined rendering of a token set; normalizing it again yields the
    /// same set.
    pub fn render(tokens: &TokenSet) -> String {
        tokens.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
    }

    /// The `n` highest-ranked keywords of `text`: descending frequency, ties
    /// broken by first occurrence.
    pub fn top_keywords(&self, text: &str, n: usize) -> Vec<String> {
        // token -> (count, first position)
        let mut stats: HashMap<String, (usize, usize)> = HashMap::new();
        for (position, token) in self.tokens(text).into_iter().enumerate() {
            stats
                .entry(token)
                .and_modify(|(count, _)| *count += 1)
                .or_insert((1, position));
        }

        let mut ranked: Vec<(String, usize, usize)> = stats
            .into_iter()
            .map(|(token, (count, first))| (token, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        ranked.into_iter().take(n).map(|(token, _, _)| token).collect()
    }
}
