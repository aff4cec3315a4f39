//! Rarity lookup: joins token counts against the reference corpus.
//!
//! Words the corpus has never seen resolve to count 0, which puts them in
//! the rarest bucket alongside the rarest known words.

use crate::corpus::ReferenceCorpus;
use crate::tokenize::TokenTable;

/// One token of the input with its corpus count attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedToken {
    /// The normalized word.
    pub word: String,
    /// Occurrences of the word in the input.
    pub token_count: usize,
    /// The word's corpus count, 0 if absent.
    pub count: u64,
}

/// Closed interval `[min, max]` over corpus counts.
///
/// Bounds are signed so an upper bound of `-1` (from an exclusive limit of
/// 0) makes an empty range rather than wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankRange {
    /// Smallest count included.
    pub min: i64,
    /// Largest count included.
    pub max: i64,
}

impl RankRange {
    /// Range including both ends.
    pub const fn inclusive(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Range including `min` but not `max`.
    pub const fn half_open(min: i64, max: i64) -> Self {
        Self {
            min,
            max: max.saturating_sub(1),
        }
    }

    /// Whether `count` falls inside the range.
    pub fn contains(&self, count: u64) -> bool {
        let count = i128::from(count);
        count >= i128::from(self.min) && count <= i128::from(self.max)
    }

    /// Whether no count can fall inside the range.
    pub const fn is_empty(&self) -> bool {
        self.max < self.min || self.max < 0
    }
}

/// The token table left-joined with the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTable {
    rows: Vec<ResolvedToken>,
}

impl ResolvedTable {
    /// All rows, one per distinct token, in token table order.
    pub fn rows(&self) -> &[ResolvedToken] {
        &self.rows
    }

    /// Every word occurrence in the input, duplicates included.
    pub fn total_words(&self) -> usize {
        self.rows.iter().map(|row| row.token_count).sum()
    }

    /// Rows whose corpus count falls in `range`.
    pub fn select(&self, range: RankRange) -> impl Iterator<Item = &ResolvedToken> {
        self.rows.iter().filter(move |row| range.contains(row.count))
    }

    /// Sum of `token_count` over rows whose corpus count falls in `range`.
    pub fn occurrences_in(&self, range: RankRange) -> usize {
        self.select(range).map(|row| row.token_count).sum()
    }
}

/// Attach a corpus count to every token. Absent words get count 0.
#[tracing::instrument(skip_all, fields(tokens = tokens.len(), corpus_words = corpus.len()))]
pub fn resolve(tokens: &TokenTable, corpus: &ReferenceCorpus) -> ResolvedTable {
    let mut rows = Vec::with_capacity(tokens.len());
    for (word, token_count) in tokens.iter() {
        rows.push(ResolvedToken {
            word: word.to_string(),
            token_count,
            count: corpus.get(word).unwrap_or(0),
        });
    }
    ResolvedTable { rows }
}
