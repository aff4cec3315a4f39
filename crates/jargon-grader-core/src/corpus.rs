//! Reference word-frequency corpus.
//!
//! A [`ReferenceCorpus`] maps each known word to a count, where lower counts
//! mean rarer words. It is loaded once from a data file and read-only after
//! that. Core APIs take it by reference; the CLI installs one process-wide
//! copy with [`install`] and reads it back with [`global`].
//!
//! # Supported formats
//!
//! - JSON (`.json`): an object of `"word": count` pairs
//! - Delimited text (anything else): one `word,count` or `word<TAB>count`
//!   per line. Blank lines and `#` comments are skipped, and a leading
//!   `word,count` header is allowed.

use std::collections::HashMap;
use std::sync::OnceLock;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::{CorpusError, CorpusResult};

/// On-disk layout of a corpus file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum CorpusFormat {
    /// JSON object of word counts.
    Json,
    /// Comma- or tab-separated `word,count` lines.
    Delimited,
}

impl CorpusFormat {
    /// Pick a format from a file extension. Only `.json` is JSON.
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Delimited,
        }
    }

    /// Returns the format name as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Delimited => "delimited",
        }
    }
}

impl std::fmt::Display for CorpusFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable `word -> count` mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceCorpus {
    counts: HashMap<String, u64>,
}

impl ReferenceCorpus {
    /// Build a corpus from in-memory pairs. Words are lowercased; a repeated
    /// word keeps its last count.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let counts = pairs
            .into_iter()
            .map(|(word, count)| (word.as_ref().to_lowercase(), count))
            .collect();
        Self { counts }
    }

    /// Load a corpus file, choosing the format from its extension.
    pub fn load(path: &Utf8Path) -> CorpusResult<Self> {
        Self::load_as(path, CorpusFormat::from_path(path))
    }

    /// Load a corpus file in an explicit format.
    #[tracing::instrument(skip_all, fields(path = %path, format = %format))]
    pub fn load_as(path: &Utf8Path, format: CorpusFormat) -> CorpusResult<Self> {
        let raw = std::fs::read_to_string(path.as_std_path()).map_err(|e| CorpusError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let corpus = match format {
            CorpusFormat::Json => Self::parse_json(path, &raw)?,
            CorpusFormat::Delimited => Self::parse_delimited(path, &raw)?,
        };

        if corpus.is_empty() {
            return Err(CorpusError::Empty {
                path: path.to_path_buf(),
            });
        }

        tracing::debug!(words = corpus.len(), "corpus loaded");
        Ok(corpus)
    }

    /// Parse a JSON object of word counts.
    fn parse_json(path: &Utf8Path, raw: &str) -> CorpusResult<Self> {
        let counts: HashMap<String, u64> =
            serde_json::from_str(raw).map_err(|e| CorpusError::Json {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(Self::from_pairs(counts))
    }

    /// Parse `word,count` or `word<TAB>count` lines.
    fn parse_delimited(path: &Utf8Path, raw: &str) -> CorpusResult<Self> {
        let mut counts = HashMap::new();

        for (idx, line) in raw.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parse_error = |message: String| CorpusError::Parse {
                path: path.to_path_buf(),
                line: line_no,
                message,
            };

            let Some((word, count)) = line.split_once([',', '\t']) else {
                return Err(parse_error(format!("expected `word,count`, got {line:?}")));
            };
            let (word, count) = (word.trim(), count.trim());

            match count.parse::<u64>() {
                Ok(count) if !word.is_empty() => {
                    counts.insert(word.to_lowercase(), count);
                }
                Ok(_) => return Err(parse_error("missing word".to_string())),
                Err(_) if counts.is_empty() && count.eq_ignore_ascii_case("count") => {
                    tracing::trace!(line = line_no, "skipping header");
                }
                Err(e) => return Err(parse_error(format!("invalid count {count:?}: {e}"))),
            }
        }

        Ok(Self { counts })
    }

    /// Count for `word`, or `None` when the corpus has never seen it.
    pub fn get(&self, word: &str) -> Option<u64> {
        self.counts.get(word).copied()
    }

    /// Whether `word` is in the corpus.
    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    /// Number of words in the corpus.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the corpus holds no words.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

static GLOBAL_CORPUS: OnceLock<ReferenceCorpus> = OnceLock::new();

/// Install the process-wide corpus. Fails if one is already installed.
pub fn install(corpus: ReferenceCorpus) -> CorpusResult<&'static ReferenceCorpus> {
    GLOBAL_CORPUS
        .set(corpus)
        .map_err(|_| CorpusError::AlreadyInstalled)?;
    global()
}

/// The process-wide corpus installed by [`install`].
pub fn global() -> CorpusResult<&'static ReferenceCorpus> {
    GLOBAL_CORPUS.get().ok_or(CorpusError::Uninitialized)
}

/// Resolve where the corpus should be loaded from.
///
/// An explicit path (e.g. from `--corpus`) wins over the configured one.
pub fn resolve_path(
    explicit: Option<&Utf8Path>,
    configured: Option<&Utf8Path>,
) -> CorpusResult<Utf8PathBuf> {
    explicit
        .or(configured)
        .map(Utf8Path::to_path_buf)
        .ok_or(CorpusError::NotConfigured)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_corpus(dir: &TempDir, name: &str, body: &str) -> Utf8PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        Utf8PathBuf::try_from(path).unwrap()
    }

    #[test]
    fn from_pairs_lowercases_and_keeps_last() {
        let corpus = ReferenceCorpus::from_pairs([("The", 10), ("the", 20), ("cat", 3)]);
        assert_eq!(corpus.get("the"), Some(20));
        assert_eq!(corpus.get("cat"), Some(3));
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn loads_csv_with_header() {
        let tmp = TempDir::new().unwrap();
        let path = write_corpus(&tmp, "words.csv", "word,count\nthe,5000\ncat,40\n\nMat,5\n");
        let corpus = ReferenceCorpus::load(&path).unwrap();
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.get("mat"), Some(5));
        assert!(!corpus.contains("word"));
    }

    #[test]
    fn loads_tsv_with_comments() {
        let tmp = TempDir::new().unwrap();
        let path = write_corpus(&tmp, "words.tsv", "# frequency list\nthe\t5000\nsat\t90\n");
        let corpus = ReferenceCorpus::load(&path).unwrap();
        assert_eq!(corpus.get("sat"), Some(90));
    }

    #[test]
    fn loads_json_object() {
        let tmp = TempDir::new().unwrap();
        let path = write_corpus(&tmp, "words.json", r#"{"the": 5000, "Cat": 40}"#);
        let corpus = ReferenceCorpus::load(&path).unwrap();
        assert_eq!(corpus.get("cat"), Some(40));
    }

    #[test]
    fn explicit_format_overrides_extension() {
        let tmp = TempDir::new().unwrap();
        let path = write_corpus(&tmp, "words.data", r#"{"on": 6000}"#);
        let corpus = ReferenceCorpus::load_as(&path, CorpusFormat::Json).unwrap();
        assert_eq!(corpus.get("on"), Some(6000));
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let tmp = TempDir::new().unwrap();
        let path = write_corpus(&tmp, "words.csv", "the,5000\ncat forty\n");
        let err = ReferenceCorpus::load(&path).unwrap_err();
        assert!(matches!(err, CorpusError::Parse { line: 2, .. }), "{err}");
    }

    #[test]
    fn negative_count_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_corpus(&tmp, "words.csv", "cat,-4\n");
        assert!(matches!(
            ReferenceCorpus::load(&path),
            Err(CorpusError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn header_only_after_data_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_corpus(&tmp, "words.csv", "the,1\nword,count\n");
        assert!(ReferenceCorpus::load(&path).is_err());
    }

    #[test]
    fn empty_corpus_is_unavailable() {
        let tmp = TempDir::new().unwrap();
        let path = write_corpus(&tmp, "words.csv", "word,count\n");
        assert!(matches!(
            ReferenceCorpus::load(&path),
            Err(CorpusError::Empty { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ReferenceCorpus::load(Utf8Path::new("/nonexistent/corpus.csv")).unwrap_err();
        assert!(matches!(err, CorpusError::Io { .. }));
    }

    #[test]
    fn invalid_json_is_reported() {
        let tmp = TempDir::new().unwrap();
        let path = write_corpus(&tmp, "words.json", r#"["the", "cat"]"#);
        assert!(matches!(
            ReferenceCorpus::load(&path),
            Err(CorpusError::Json { .. })
        ));
    }

    #[test]
    fn format_from_path() {
        assert_eq!(
            CorpusFormat::from_path(Utf8Path::new("a/words.JSON")),
            CorpusFormat::Json
        );
        assert_eq!(
            CorpusFormat::from_path(Utf8Path::new("words.csv")),
            CorpusFormat::Delimited
        );
        assert_eq!(
            CorpusFormat::from_path(Utf8Path::new("words")),
            CorpusFormat::Delimited
        );
    }

    #[test]
    fn resolve_path_prefers_explicit() {
        let explicit = Utf8Path::new("cli.csv");
        let configured = Utf8Path::new("config.csv");
        assert_eq!(
            resolve_path(Some(explicit), Some(configured)).unwrap(),
            explicit
        );
        assert_eq!(resolve_path(None, Some(configured)).unwrap(), configured);
        assert!(matches!(
            resolve_path(None, None),
            Err(CorpusError::NotConfigured)
        ));
    }

    #[test]
    fn global_install_happens_once() {
        // Only this test touches the process-wide corpus.
        assert!(matches!(global(), Err(CorpusError::Uninitialized)));
        let installed = install(ReferenceCorpus::from_pairs([("cat", 40)])).unwrap();
        assert_eq!(installed.get("cat"), Some(40));
        assert_eq!(global().unwrap().get("cat"), Some(40));
        assert!(matches!(
            install(ReferenceCorpus::default()),
            Err(CorpusError::AlreadyInstalled)
        ));
    }
}
