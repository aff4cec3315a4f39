//! Score command: jargon score of a file, 100 meaning no rare words.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use jargon_grader_core::{JargonGrader, ReferenceCorpus, Thresholds};

use super::{prose, read_input_file};

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// File to analyze (`-` for stdin).
    pub file: Utf8PathBuf,

    /// Corpus count at which words stop counting as rare (exclusive).
    #[arg(long, allow_negative_numbers = true)]
    pub max_rare_count: Option<i64>,

    /// Highest corpus count that still counts as uncommon.
    #[arg(long, allow_negative_numbers = true)]
    pub max_uncommon_count: Option<i64>,

    /// Minimum acceptable score.
    #[arg(long)]
    pub min_score: Option<f64>,
}

/// Score a file and optionally gate on a minimum score.
#[instrument(name = "cmd_score", skip_all, fields(file = %args.file))]
pub fn cmd_score(
    args: ScoreArgs,
    global_json: bool,
    corpus: &ReferenceCorpus,
    config_thresholds: &Thresholds,
    config_min_score: Option<f64>,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(
        file = %args.file,
        max_rare_count = ?args.max_rare_count,
        max_uncommon_count = ?args.max_uncommon_count,
        min_score = ?args.min_score,
        "executing score command"
    );

    let content = read_input_file(&args.file, max_input_bytes)?;
    let text = prose(&args.file, content);

    let thresholds = Thresholds {
        max_rare_count: args
            .max_rare_count
            .unwrap_or(config_thresholds.max_rare_count),
        max_uncommon_count: args
            .max_uncommon_count
            .unwrap_or(config_thresholds.max_uncommon_count),
        ..*config_thresholds
    };
    let min_score = args.min_score.or(config_min_score);

    let report = JargonGrader::new(corpus)
        .score_report(&text, &thresholds, min_score)
        .with_context(|| format!("failed to score {}", args.file))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        if report.below_min {
            bail!("{} scores {:.1}, below the minimum", args.file, report.score);
        }
    } else if report.below_min {
        let min = report.min_score.unwrap_or(0.0);
        bail!(
            "{} scores {:.1} (min: {:.1}). Replace rare words with plainer ones.",
            args.file,
            report.score,
            min,
        );
    } else if let Some(min) = report.min_score {
        println!(
            "{} {} scores {:.1} (min: {:.1})",
            "PASS:".green(),
            args.file,
            report.score,
            min,
        );
    } else {
        println!("{:.1}", report.score);
    }

    Ok(())
}
