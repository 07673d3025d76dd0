//! Query normalization
//!
//! Lower-cases a query and splits it on Unicode word boundaries, optionally
//! dropping stop words. Tokens are produced lazily.

use crate::text::stopwords::StopWordSet;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

/// Ordered, lower-cased word tokens derived from one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence {
    tokens: Vec<String>,
}

impl TokenSequence {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.tokens.iter().any(|t| t == word)
    }

    /// True if `words` occur back to back somewhere in the sequence.
    pub fn contains_run(&self, words: &[&str]) -> bool {
        if words.is_empty() || words.len() > self.tokens.len() {
            return false;
        }
        self.tokens
            .windows(words.len())
            .any(|window| window.iter().zip(words).all(|(t, w)| t == w))
    }

    /// Tokens joined by single spaces.
    pub fn joined(&self) -> String {
        self.tokens.join(" ")
    }
}

impl FromIterator<String> for TokenSequence {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

/// Normalizer bound to one stop-word set.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stop_words: Arc<StopWordSet>,
}

impl Normalizer {
    pub fn new(stop_words: Arc<StopWordSet>) -> Self {
        Self { stop_words }
    }

    pub fn stop_words(&self) -> &StopWordSet {
        &self.stop_words
    }

    /// Lazily yield normalized tokens, one per Unicode word in `query`.
    pub fn tokens<'a>(
        &'a self,
        query: &'a str,
        strip_stop_words: bool,
    ) -> impl Iterator<Item = String> + 'a {
        query
            .unicode_words()
            .map(str::to_lowercase)
            .filter(move |word| !strip_stop_words || !self.stop_words.contains(word))
    }

    pub fn normalize(&self, query: &str, strip_stop_words: bool) -> TokenSequence {
        self.tokens(query, strip_stop_words).collect()
    }
}
