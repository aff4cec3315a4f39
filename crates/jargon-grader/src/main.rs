//! jargon-grader CLI
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use jargon_grader::{Cli, Commands, commands};
use jargon_grader_core::config::ConfigLoader;
use tracing::debug;

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // arg_required_else_help ensures we have --version-only or a subcommand
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let cwd = camino::Utf8PathBuf::try_from(cwd).map_err(|e| {
        anyhow::anyhow!(
            "current directory is not valid UTF-8: {}",
            e.into_path_buf().display()
        )
    })?;
    let mut loader = ConfigLoader::new().with_project_search(&cwd);
    if let Some(ref config_path) = cli.config {
        let config_path = commands::utf8_path(config_path, "config path")?;
        loader = loader.with_file(&config_path);
    }
    let (config, config_sources) = loader.load().context("failed to load configuration")?;

    let obs_config = observability::ObservabilityConfig::from_env_with_overrides(
        config
            .log_dir
            .as_ref()
            .map(|dir| dir.as_std_path().to_path_buf()),
    );
    let env_filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&obs_config, env_filter)
        .context("failed to initialize logging/tracing")?;

    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        chdir = ?cli.chdir,
        corpus = ?cli.corpus,
        "CLI initialized"
    );

    let max_input = config.input_limit();
    let thresholds = config.thresholds();
    let corpus_override = cli
        .corpus
        .as_deref()
        .map(|p| commands::utf8_path(p, "corpus path"))
        .transpose()?;
    let corpus_format = cli.corpus_format.or(config.corpus_format);

    let result = match command {
        Commands::Words(args) => commands::load_corpus(
            corpus_override.as_deref(),
            config.corpus.as_deref(),
            corpus_format,
        )
        .and_then(|corpus| {
            commands::words::cmd_words(args, cli.json, corpus, &thresholds, max_input)
        }),
        Commands::Score(args) => commands::load_corpus(
            corpus_override.as_deref(),
            config.corpus.as_deref(),
            corpus_format,
        )
        .and_then(|corpus| {
            commands::score::cmd_score(
                args,
                cli.json,
                corpus,
                &thresholds,
                config.min_score,
                max_input,
            )
        }),
        Commands::Info(args) => commands::info::cmd_info(
            args,
            cli.json,
            &config,
            &config_sources,
            corpus_override.as_deref(),
            cli.corpus_format,
        ),
    };
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}
