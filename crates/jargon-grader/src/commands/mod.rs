//! Command implementations.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use jargon_grader_core::corpus::{self, CorpusFormat, ReferenceCorpus};
use jargon_grader_core::markdown;

pub mod info;
pub mod score;
pub mod words;

/// Path argument meaning "read standard input".
pub const STDIN_PATH: &str = "-";

/// Convert a CLI path to UTF-8, naming `what` in the error.
pub fn utf8_path(path: &Path, what: &str) -> anyhow::Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(path.to_path_buf()).map_err(|e| {
        anyhow::anyhow!("{what} is not valid UTF-8: {}", e.into_path_buf().display())
    })
}

/// Load the reference corpus and install it as the process-wide instance.
///
/// `explicit` (from `--corpus`) wins over `configured`. The format comes
/// from `format` when given, otherwise from the file extension.
pub fn load_corpus(
    explicit: Option<&Utf8Path>,
    configured: Option<&Utf8Path>,
    format: Option<CorpusFormat>,
) -> anyhow::Result<&'static ReferenceCorpus> {
    let path = corpus::resolve_path(explicit, configured)
        .context("set `corpus` in config, JARGON_GRADER_CORPUS, or pass --corpus")?;
    let format = format.unwrap_or_else(|| CorpusFormat::from_path(&path));

    let loaded = ReferenceCorpus::load_as(&path, format)
        .with_context(|| format!("failed to load corpus {path}"))?;

    Ok(corpus::install(loaded)?)
}

/// Read a file (or stdin for `-`) and validate its size against the
/// configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    if path.as_str() == STDIN_PATH {
        return read_stdin(max_bytes);
    }

    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

fn read_stdin(max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut content = String::new();
    let stdin = std::io::stdin().lock();
    match max_bytes {
        Some(max) => {
            // One byte past the limit is enough to know it was exceeded.
            let cap = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1);
            stdin
                .take(cap)
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
            if content.len() > max {
                anyhow::bail!("input too large: stdin exceeds {max} bytes");
            }
        }
        None => {
            let mut stdin = stdin;
            stdin
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
        }
    }
    Ok(content)
}

/// Reduce markdown input to prose. Other inputs pass through unchanged.
pub fn prose(path: &Utf8Path, content: String) -> String {
    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("md")) {
        markdown::strip_to_prose(&content)
    } else {
        content
    }
}
