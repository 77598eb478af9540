//! Question tokenizer with stop-word filtering.

use std::collections::{BTreeSet, HashSet};

/// Words too common to carry signal in an FAQ question.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "what", "who", "where", "when", "why", "how", "does", "do",
    "can", "could",
];

/// Tokens with this many characters or fewer are dropped.
const MIN_TOKEN_CHARS: usize = 2;

#[derive(Debug, Clone)]
pub struct TermExtractor {
    stop_words: HashSet<String>,
}

impl Default for TermExtractor {
    fn default() -> Self {
        Self::with_stop_words(STOP_WORDS.iter().copied())
    }
}

impl TermExtractor {
    /// Replaces the default stop-word set. Entries are lowercased and trimmed.
    pub fn with_stop_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stop_words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { stop_words }
    }

    /// Lowercases, splits on whitespace, drops short tokens and stop-words.
    ///
    /// Punctuation stays attached to tokens, so `"company?"` is a term of its own.
    /// An empty set is a valid result.
    pub fn extract(&self, question: &str) -> BTreeSet<String> {
        question
            .to_lowercase()
            .split_whitespace()
            .filter(|t| t.chars().count() > MIN_TOKEN_CHARS)
            .filter(|t| !self.stop_words.contains(*t))
            .map(str::to_string)
            .collect()
    }
}

/// [`TermExtractor::extract`] with the default stop-words.
pub fn extract_terms(question: &str) -> BTreeSet<String> {
    TermExtractor::default().extract(question)
}
