//! Logging setup for the CLI.
//!
//! Human-readable logs go to stderr. JSON-lines logs go to a file when a log
//! path or directory is available:
//!
//! 1. `JARGON_GRADER_LOG_PATH` (exact file, appended to)
//! 2. `JARGON_GRADER_LOG_DIR`, then the configured `log_dir`
//! 3. The platform data directory (`~/.local/share/jargon-grader/logs` on Linux)
//!
//! A directory gets a daily-rotated `jargon-grader.jsonl`.

use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

const ENV_LOG_PATH: &str = "JARGON_GRADER_LOG_PATH";
const ENV_LOG_DIR: &str = "JARGON_GRADER_LOG_DIR";
const LOG_FILE_PREFIX: &str = "jargon-grader.jsonl";

/// Where JSONL logs should be written.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Exact log file path.
    pub log_path: Option<PathBuf>,
    /// Directory for rotated log files.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read log locations from the environment, falling back to `log_dir`
    /// and then to the platform data directory.
    pub fn from_env_with_overrides(log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(ENV_LOG_PATH).map(PathBuf::from),
            std::env::var_os(ENV_LOG_DIR).map(PathBuf::from),
            log_dir,
        )
    }

    /// Pick log locations: the env directory beats `configured_dir`, which
    /// beats the platform default.
    fn resolve(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        configured_dir: Option<PathBuf>,
    ) -> Self {
        let log_dir = env_dir.or(configured_dir).or_else(default_log_dir);
        Self {
            log_path: env_path,
            log_dir,
        }
    }
}

fn default_log_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "jargon-grader")
        .map(|dirs| dirs.data_local_dir().join("logs"))
}

/// Build the log filter.
///
/// `RUST_LOG` wins when set. Otherwise `--quiet` means errors only, each
/// `-v` raises the level one step, and the configured level applies
/// without flags.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => config_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::new(level)
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// whole of `main`. A log file that can't be opened disables file logging
/// rather than failing the run.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let (writer, guard, file_error) = match open_log_writer(config) {
        Ok(Some((writer, guard))) => (Some(writer), Some(guard), None),
        Ok(None) => (None, None, None),
        Err(e) => (None, None, Some(e)),
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    let file_layer = writer.map(|w| fmt::layer().json().with_writer(w).with_ansi(false));

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    if let Some(e) = file_error {
        tracing::warn!(error = %e, "file logging disabled");
    }

    Ok(guard)
}

type LogWriter = (tracing_appender::non_blocking::NonBlocking, WorkerGuard);

fn open_log_writer(config: &ObservabilityConfig) -> anyhow::Result<Option<LogWriter>> {
    if let Some(ref path) = config.log_path {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        return Ok(Some(tracing_appender::non_blocking(file)));
    }

    if let Some(ref dir) = config.log_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
        let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        return Ok(Some(tracing_appender::non_blocking(appender)));
    }

    Ok(None)
}
