//! Core library for jargon-grader.
//!
//! Estimates how jargon-heavy a text is by looking its words up in a
//! reference word-frequency corpus.
//!
//! # Modules
//!
//! - [`normalize`] - Text cleaning down to lowercase words and hyphens
//! - [`tokenize`] - Per-input token counts
//! - [`corpus`] - The reference corpus and its loader
//! - [`rarity`] - Joining tokens against the corpus
//! - [`jargon`] - Jargon word listing and jargon scoring
//! - [`markdown`] - Prose extraction from markdown
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use jargon_grader_core::{JargonGrader, ReferenceCorpus};
//!
//! let corpus = ReferenceCorpus::from_pairs([("the", 5000), ("cat", 40), ("mat", 5)]);
//! let grader = JargonGrader::new(&corpus);
//!
//! let words = grader.jargon_words("The cat sat on the mat.", 0, 80).unwrap();
//! assert!(words.contains(&("cat".to_string(), 1)));
//!
//! let score = grader.jargon_score("The the the.", 80, 1000).unwrap();
//! assert_eq!(score, 100.0);
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod corpus;
pub mod error;
pub mod jargon;
pub mod markdown;
pub mod normalize;
pub mod rarity;
pub mod tokenize;

pub use config::{Config, ConfigLoader, LogLevel};
pub use corpus::{CorpusFormat, ReferenceCorpus};
pub use error::{
    AnalysisError, AnalysisResult, ConfigError, ConfigResult, CorpusError, CorpusResult,
};
pub use jargon::{
    JargonGrader, JargonScoreReport, JargonWord, JargonWordsReport, Thresholds,
    get_jargon_score, get_jargon_words,
};
pub use normalize::{StandardCleaner, TextCleaner, normalize};

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
