//! Token counting over normalized text.

use std::collections::BTreeMap;

/// Distinct tokens of one input and how often each occurs.
///
/// Iterates in lexicographic word order. Built per input and dropped once
/// scoring is done.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTable {
    counts: BTreeMap<String, usize>,
}

impl TokenTable {
    /// Number of occurrences of `word`, if it appeared at all.
    pub fn get(&self, word: &str) -> Option<usize> {
        self.counts.get(word).copied()
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the table has no tokens.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all token counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterate `(word, token_count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(word, &count)| (word.as_str(), count))
    }
}

/// Split normalized text on single spaces and count each distinct token.
///
/// Expects output of [`crate::normalize::normalize`]. An empty string is not
/// rejected here: it splits into one `""` token with count 1, so callers
/// must check for empty text first.
pub fn tokenize(normalized: &str) -> TokenTable {
    let mut counts = BTreeMap::new();
    for token in normalized.split(' ') {
        *counts.entry(token.to_string()).or_insert(0) += 1;
    }
    TokenTable { counts }
}
