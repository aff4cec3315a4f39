//! Error types for jargon-grader-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur during text analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The input text normalizes to zero tokens.
    #[error("no scorable text in input")]
    EmptyInput,
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// The reference corpus could not be made available.
///
/// Every variant is fatal at startup; none of them can be recovered per call.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// The corpus file could not be read.
    #[error("failed to read corpus {path}: {source}")]
    Io {
        /// Path of the corpus file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A line of a delimited corpus file is malformed.
    #[error("{path}:{line}: {message}")]
    Parse {
        /// Path of the corpus file.
        path: Utf8PathBuf,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// A JSON corpus file is not an object of word counts.
    #[error("invalid JSON corpus {path}: {source}")]
    Json {
        /// Path of the corpus file.
        path: Utf8PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The corpus loaded but holds no words.
    #[error("corpus {path} contains no words")]
    Empty {
        /// Path of the corpus file.
        path: Utf8PathBuf,
    },

    /// No corpus path was configured.
    #[error("no corpus configured. Pass --corpus or set `corpus` in config")]
    NotConfigured,

    /// The process-wide corpus was read before it was installed.
    #[error("reference corpus has not been installed")]
    Uninitialized,

    /// The process-wide corpus was installed twice.
    #[error("reference corpus is already installed")]
    AlreadyInstalled,
}

/// Result type alias using [`CorpusError`].
pub type CorpusResult<T> = Result<T, CorpusError>;
