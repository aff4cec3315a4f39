//! Words command: list the rare words in a file.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use jargon_grader_core::{JargonGrader, ReferenceCorpus, Thresholds};

use super::{prose, read_input_file};

/// Arguments for the `words` subcommand.
#[derive(Args, Debug)]
pub struct WordsArgs {
    /// File to analyze (`-` for stdin).
    pub file: Utf8PathBuf,

    /// Lowest corpus count a word may have to be listed.
    #[arg(long, allow_negative_numbers = true)]
    pub min_count: Option<i64>,

    /// Corpus count at which words stop being listed (exclusive).
    #[arg(long, allow_negative_numbers = true)]
    pub max_count: Option<i64>,
}

/// List words whose corpus count falls in `[min_count, max_count)`.
#[instrument(name = "cmd_words", skip_all, fields(file = %args.file))]
pub fn cmd_words(
    args: WordsArgs,
    global_json: bool,
    corpus: &ReferenceCorpus,
    config_thresholds: &Thresholds,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(
        file = %args.file,
        min_count = ?args.min_count,
        max_count = ?args.max_count,
        "executing words command"
    );

    let content = read_input_file(&args.file, max_input_bytes)?;
    let text = prose(&args.file, content);

    let thresholds = Thresholds {
        min_count: args.min_count.unwrap_or(config_thresholds.min_count),
        max_count: args.max_count.unwrap_or(config_thresholds.max_count),
        ..*config_thresholds
    };

    let report = JargonGrader::new(corpus)
        .words_report(&text, &thresholds)
        .with_context(|| format!("failed to find jargon in {}", args.file))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.words.is_empty() {
        println!("{}", "no jargon words".dimmed());
    } else {
        for word in &report.words {
            println!("{}\t{}", word.word, word.count);
        }
    }

    Ok(())
}
