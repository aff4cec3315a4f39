//! Info command implementation

use camino::Utf8Path;
use clap::Args;
use jargon_grader_core::Thresholds;
use jargon_grader_core::config::{Config, ConfigSources};
use jargon_grader_core::corpus::CorpusFormat;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    homepage: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            homepage: env!("CARGO_PKG_HOMEPAGE"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    corpus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    corpus_format: Option<String>,
    thresholds: Thresholds,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
}

impl ConfigInfo {
    fn from_config(
        config: &Config,
        sources: &ConfigSources,
        corpus_override: Option<&Utf8Path>,
        corpus_format_override: Option<CorpusFormat>,
    ) -> Self {
        let corpus = corpus_override
            .or(config.corpus.as_deref())
            .map(|p| p.to_string());
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            corpus,
            corpus_format: corpus_format_override
                .or(config.corpus_format)
                .map(|f| f.as_str().to_string()),
            thresholds: config.thresholds(),
            min_score: config.min_score,
            max_input_bytes: config.input_limit(),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information and the effective configuration.
///
/// Does not load the corpus, so it works before one is configured.
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
    corpus_override: Option<&Utf8Path>,
    corpus_format_override: Option<CorpusFormat>,
) -> anyhow::Result<()> {
    let info = PackageInfo::new();

    debug!(json_output = global_json, "executing info command");

    let config_info =
        ConfigInfo::from_config(config, sources, corpus_override, corpus_format_override);
    let full_info = FullInfo {
        package: info,
        config: config_info,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    println!(
        "{} {}",
        full_info.package.name.bold(),
        full_info.package.version.green()
    );
    if !full_info.package.description.is_empty() {
        println!("{}", full_info.package.description);
    }
    if !full_info.package.license.is_empty() {
        println!("{}: {}", "License".dimmed(), full_info.package.license);
    }
    if !full_info.package.repository.is_empty() {
        println!(
            "{}: {}",
            "Repository".dimmed(),
            full_info.package.repository.cyan()
        );
    }

    let cfg = &full_info.config;
    println!();
    println!("{}", "Configuration".bold().underline());
    if let Some(ref path) = cfg.config_file {
        println!("{}: {}", "Config file".dimmed(), path.cyan());
    } else {
        println!("{}: {}", "Config file".dimmed(), "none loaded".yellow());
    }
    println!("{}: {}", "Log level".dimmed(), cfg.log_level);
    if let Some(ref dir) = cfg.log_dir {
        println!("{}: {}", "Log directory".dimmed(), dir);
    }
    match cfg.corpus {
        Some(ref path) => println!("{}: {}", "Corpus".dimmed(), path.cyan()),
        None => println!("{}: {}", "Corpus".dimmed(), "not configured".yellow()),
    }
    print_opt("Corpus format", &cfg.corpus_format);

    println!();
    println!("{}", "Thresholds".bold().underline());
    let t = &cfg.thresholds;
    println!(
        "{}: [{}, {})",
        "Jargon words".dimmed(),
        t.min_count,
        t.max_count
    );
    println!("{}: [0, {})", "Rare".dimmed(), t.max_rare_count);
    println!(
        "{}: [{}, {}]",
        "Uncommon".dimmed(),
        t.max_rare_count,
        t.max_uncommon_count
    );
    match cfg.min_score {
        Some(v) => println!("{}: {:.1}", "Min score".dimmed(), v),
        None => println!("{}: {}", "Min score".dimmed(), "(not set)".dimmed()),
    }
    match cfg.max_input_bytes {
        Some(v) => println!("{}: {}", "Input limit".dimmed(), v),
        None => println!("{}: {}", "Input limit".dimmed(), "disabled".yellow()),
    }

    Ok(())
}

/// Print an optional value or "(not set)".
fn print_opt<T: std::fmt::Display>(label: &str, value: &Option<T>) {
    match value {
        Some(v) => println!("{}: {}", label.dimmed(), v),
        None => println!("{}: {}", label.dimmed(), "(not set)".dimmed()),
    }
}
