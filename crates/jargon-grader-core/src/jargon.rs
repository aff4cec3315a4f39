//! Jargon detection and scoring against a reference corpus.
//!
//! Two operations share one pipeline (normalize, tokenize, resolve):
//!
//! - [`get_jargon_words`] lists tokens whose corpus count falls in
//!   `[min_count, max_count)`.
//! - [`get_jargon_score`] grades the whole text:
//!   `100 * (1 - 0.5 * uncommon/total - rare/total)`, where rare words have a
//!   corpus count in `[0, max_rare_count)` and uncommon words in
//!   `[max_rare_count, max_uncommon_count]`. The uncommon upper bound is
//!   inclusive.
//!
//! Unknown words resolve to count 0 and so always land in the rare tier.
//! The score is not clamped.

use serde::{Deserialize, Serialize};

use crate::corpus::ReferenceCorpus;
use crate::error::{AnalysisError, AnalysisResult};
use crate::normalize::{StandardCleaner, TextCleaner, normalize_with};
use crate::rarity::{self, RankRange, ResolvedTable, ResolvedToken};
use crate::tokenize::tokenize;

/// Default lower bound for jargon words.
pub const DEFAULT_MIN_COUNT: i64 = 0;
/// Default exclusive upper bound for jargon words.
pub const DEFAULT_MAX_COUNT: i64 = 80;
/// Default exclusive upper bound of the rare tier.
pub const DEFAULT_MAX_RARE_COUNT: i64 = 80;
/// Default inclusive upper bound of the uncommon tier.
pub const DEFAULT_MAX_UNCOMMON_COUNT: i64 = 1000;

/// Penalty weight of an uncommon word relative to a rare one.
const UNCOMMON_WEIGHT: f64 = 0.5;

/// Corpus-count thresholds for both operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Lowest corpus count reported as a jargon word.
    pub min_count: i64,
    /// Corpus count at which a word stops being a jargon word.
    pub max_count: i64,
    /// Corpus count at which a word stops being rare.
    pub max_rare_count: i64,
    /// Highest corpus count still considered uncommon.
    pub max_uncommon_count: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_count: DEFAULT_MIN_COUNT,
            max_count: DEFAULT_MAX_COUNT,
            max_rare_count: DEFAULT_MAX_RARE_COUNT,
            max_uncommon_count: DEFAULT_MAX_UNCOMMON_COUNT,
        }
    }
}

impl Thresholds {
    /// Range selected by the jargon-word listing.
    pub const fn jargon_range(&self) -> RankRange {
        RankRange::half_open(self.min_count, self.max_count)
    }

    /// Rare tier of the score.
    pub const fn rare_range(&self) -> RankRange {
        RankRange::half_open(0, self.max_rare_count)
    }

    /// Uncommon tier of the score.
    pub const fn uncommon_range(&self) -> RankRange {
        RankRange::inclusive(self.max_rare_count, self.max_uncommon_count)
    }
}

/// A word found in the input with its number of occurrences there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JargonWord {
    /// The normalized word.
    pub word: String,
    /// Occurrences in the input (not the corpus count).
    pub count: usize,
}

impl From<&ResolvedToken> for JargonWord {
    fn from(row: &ResolvedToken) -> Self {
        Self {
            word: row.word.clone(),
            count: row.token_count,
        }
    }
}

/// Result of listing jargon words.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JargonWordsReport {
    /// Jargon words, most frequent first.
    pub words: Vec<JargonWord>,
    /// Occurrences of jargon words in the input.
    pub jargon_words: usize,
    /// Every word occurrence in the input.
    pub total_words: usize,
    /// Lowest corpus count included.
    pub min_count: i64,
    /// Exclusive upper corpus count.
    pub max_count: i64,
}

/// Result of scoring a text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JargonScoreReport {
    /// Jargon score. 100 means no rare or uncommon words.
    pub score: f64,
    /// Every word occurrence in the input.
    pub total_words: usize,
    /// Occurrences of rare words.
    pub rare_words: usize,
    /// Occurrences of uncommon words.
    pub uncommon_words: usize,
    /// Distinct rare words, most frequent first.
    pub rare: Vec<JargonWord>,
    /// Distinct uncommon words, most frequent first.
    pub uncommon: Vec<JargonWord>,
    /// Minimum acceptable score (if provided).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
    /// Whether the score falls below the minimum.
    pub below_min: bool,
}

/// Grades text against a borrowed reference corpus.
#[derive(Debug, Clone)]
pub struct JargonGrader<'c, C = StandardCleaner> {
    corpus: &'c ReferenceCorpus,
    cleaner: C,
}

impl<'c> JargonGrader<'c> {
    /// Grader using the standard text cleaner.
    pub const fn new(corpus: &'c ReferenceCorpus) -> Self {
        Self {
            corpus,
            cleaner: StandardCleaner,
        }
    }
}

impl<'c, C: TextCleaner> JargonGrader<'c, C> {
    /// Grader using a custom text cleaner.
    pub const fn with_cleaner(corpus: &'c ReferenceCorpus, cleaner: C) -> Self {
        Self { corpus, cleaner }
    }

    /// The corpus this grader looks words up in.
    pub const fn corpus(&self) -> &'c ReferenceCorpus {
        self.corpus
    }

    /// Run the shared pipeline, rejecting text with no tokens.
    fn resolve_text(&self, text: &str) -> AnalysisResult<ResolvedTable> {
        let normalized = normalize_with(&self.cleaner, text);
        if normalized.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }
        let tokens = tokenize(&normalized);
        Ok(rarity::resolve(&tokens, self.corpus))
    }

    /// `(word, occurrences)` for every word with a corpus count in
    /// `[min_count, max_count)`. Order is unspecified.
    pub fn jargon_words(
        &self,
        text: &str,
        min_count: i64,
        max_count: i64,
    ) -> AnalysisResult<Vec<(String, usize)>> {
        let table = self.resolve_text(text)?;
        Ok(table
            .select(RankRange::half_open(min_count, max_count))
            .map(|row| (row.word.clone(), row.token_count))
            .collect())
    }

    /// Jargon score of the whole text.
    pub fn jargon_score(
        &self,
        text: &str,
        max_rare_count: i64,
        max_uncommon_count: i64,
    ) -> AnalysisResult<f64> {
        let thresholds = Thresholds {
            max_rare_count,
            max_uncommon_count,
            ..Thresholds::default()
        };
        let table = self.resolve_text(text)?;
        Ok(score_table(&table, &thresholds))
    }

    /// Jargon words with totals, for reporting.
    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn words_report(
        &self,
        text: &str,
        thresholds: &Thresholds,
    ) -> AnalysisResult<JargonWordsReport> {
        let table = self.resolve_text(text)?;
        let range = thresholds.jargon_range();

        Ok(JargonWordsReport {
            words: collect_sorted(&table, range),
            jargon_words: table.occurrences_in(range),
            total_words: table.total_words(),
            min_count: thresholds.min_count,
            max_count: thresholds.max_count,
        })
    }

    /// Jargon score with tier breakdown, optionally gated on `min_score`.
    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn score_report(
        &self,
        text: &str,
        thresholds: &Thresholds,
        min_score: Option<f64>,
    ) -> AnalysisResult<JargonScoreReport> {
        let table = self.resolve_text(text)?;
        let score = score_table(&table, thresholds);
        let below_min = min_score.is_some_and(|min| score < min);

        tracing::debug!(score, below_min, "jargon score computed");

        Ok(JargonScoreReport {
            score,
            total_words: table.total_words(),
            rare_words: table.occurrences_in(thresholds.rare_range()),
            uncommon_words: table.occurrences_in(thresholds.uncommon_range()),
            rare: collect_sorted(&table, thresholds.rare_range()),
            uncommon: collect_sorted(&table, thresholds.uncommon_range()),
            min_score,
            below_min,
        })
    }
}

/// List jargon words in `text`: tokens with a corpus count in
/// `[min_count, max_count - 1]`, paired with their occurrences in `text`.
///
/// # Errors
///
/// [`AnalysisError::EmptyInput`] when `text` has no letters.
pub fn get_jargon_words(
    corpus: &ReferenceCorpus,
    text: &str,
    min_count: i64,
    max_count: i64,
) -> AnalysisResult<Vec<(String, usize)>> {
    JargonGrader::new(corpus).jargon_words(text, min_count, max_count)
}

/// Score `text` from 100 (plain) downward as rare and uncommon words take
/// up more of it.
///
/// # Errors
///
/// [`AnalysisError::EmptyInput`] when `text` has no letters.
pub fn get_jargon_score(
    corpus: &ReferenceCorpus,
    text: &str,
    max_rare_count: i64,
    max_uncommon_count: i64,
) -> AnalysisResult<f64> {
    JargonGrader::new(corpus).jargon_score(text, max_rare_count, max_uncommon_count)
}

/// Score a non-empty resolved table.
fn score_table(table: &ResolvedTable, thresholds: &Thresholds) -> f64 {
    let total = table.total_words() as f64;
    let rare_share = table.occurrences_in(thresholds.rare_range()) as f64 / total;
    let uncommon_share = table.occurrences_in(thresholds.uncommon_range()) as f64 / total;

    let penalty = UNCOMMON_WEIGHT.mul_add(uncommon_share, rare_share);
    100.0 * (1.0 - penalty)
}

/// Rows in `range` as report entries, most frequent first, then by word.
fn collect_sorted(table: &ResolvedTable, range: RankRange) -> Vec<JargonWord> {
    let mut words: Vec<JargonWord> = table.select(range).map(JargonWord::from).collect();
    words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    words
}
