//! Configuration loading and discovery.
//!
//! Settings are layered with figment, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. User config: `~/.config/jargon-grader/config.<ext>`
//! 3. Project config, found by walking up from the working directory. The
//!    closest directory with any match wins; within it `.jargon.<ext>`,
//!    `jargon.<ext>`, `.jargon-grader.<ext>` and `jargon-grader.<ext>` merge
//!    in that order.
//! 4. Explicit files (`--config`)
//! 5. `JARGON_GRADER_*` environment variables
//!
//! `<ext>` is one of `toml`, `yaml`, `yml`, `json`. The walk stops at a
//! directory holding `.git`.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use jargon_grader_core::config::ConfigLoader;
//!
//! let cwd = Utf8PathBuf::try_from(std::env::current_dir()?)?;
//! let (config, sources) = ConfigLoader::new().with_project_search(&cwd).load()?;
//! println!("{:?} from {:?}", config.corpus, sources.primary_file());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::corpus::CorpusFormat;
use crate::error::{ConfigError, ConfigResult};
use crate::jargon::Thresholds;

/// Effective settings for a jargon-grader run.
///
/// Threshold fields left unset fall back to [`Thresholds::default`].
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Minimum level for stderr and file logs.
    pub log_level: LogLevel,
    /// Where rotated JSONL logs go. The platform data directory is used
    /// when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Word-frequency corpus, relative to the working directory.
    pub corpus: Option<Utf8PathBuf>,
    /// Corpus file format. Detected from the extension when unset.
    pub corpus_format: Option<CorpusFormat>,
    /// Lowest corpus count listed by `words`.
    pub min_count: Option<i64>,
    /// Exclusive upper corpus count listed by `words`.
    pub max_count: Option<i64>,
    /// Exclusive upper bound of the rare tier.
    pub max_rare_count: Option<i64>,
    /// Inclusive upper bound of the uncommon tier.
    pub max_uncommon_count: Option<i64>,
    /// `score` fails for inputs scoring below this.
    pub min_score: Option<f64>,
    /// Input size cap in bytes, [`crate::DEFAULT_MAX_INPUT_BYTES`] when unset.
    pub max_input_bytes: Option<usize>,
    /// Read inputs of any size, ignoring `max_input_bytes`.
    pub disable_input_limit: bool,
}

impl Config {
    /// Thresholds from config, with defaults for anything unset.
    pub fn thresholds(&self) -> Thresholds {
        let defaults = Thresholds::default();
        Thresholds {
            min_count: self.min_count.unwrap_or(defaults.min_count),
            max_count: self.max_count.unwrap_or(defaults.max_count),
            max_rare_count: self.max_rare_count.unwrap_or(defaults.max_rare_count),
            max_uncommon_count: self
                .max_uncommon_count
                .unwrap_or(defaults.max_uncommon_count),
        }
    }

    /// Effective input size limit, or `None` when limits are disabled.
    pub fn input_limit(&self) -> Option<usize> {
        (!self.disable_input_limit)
            .then(|| self.max_input_bytes.unwrap_or(crate::DEFAULT_MAX_INPUT_BYTES))
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including per-command detail.
    Debug,
    /// Startup and summary events.
    #[default]
    Info,
    /// Problems that didn't stop the run.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// The level as an `EnvFilter` directive.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// The files that fed a loaded [`Config`], lowest precedence first.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// User config file, if one exists.
    pub user_file: Option<Utf8PathBuf>,
    /// Project files from the closest directory that had any.
    pub project_files: Vec<Utf8PathBuf>,
    /// Files passed with `--config`.
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The file whose values won: explicit, then project, then user.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .or(self.project_files.last())
            .map(Utf8PathBuf::as_path)
            .or(self.user_file.as_deref())
    }
}

const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Project file stems, lowest precedence first.
const PROJECT_STEMS: &[&str] = &[".jargon", "jargon", ".jargon-grader", "jargon-grader"];

/// The project walk ends at the directory holding this entry.
const PROJECT_ROOT_MARKER: &str = ".git";

const ENV_PREFIX: &str = "JARGON_GRADER_";

/// Builds a [`Config`] from defaults, config files and the environment.
#[derive(Debug)]
pub struct ConfigLoader {
    search_root: Option<Utf8PathBuf>,
    include_user_config: bool,
    explicit_files: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader that reads the user config and no project files.
    pub const fn new() -> Self {
        Self {
            search_root: None,
            include_user_config: true,
            explicit_files: Vec::new(),
        }
    }

    /// Look for project files starting at `dir` and walking up.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, dir: P) -> Self {
        self.search_root = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Merge `path` above every discovered file. Later calls win.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Merge every source and extract the config.
    #[tracing::instrument(skip(self), fields(search_root = ?self.search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        let sources = ConfigSources {
            user_file: self
                .include_user_config
                .then(find_user_config)
                .flatten(),
            project_files: self
                .search_root
                .as_deref()
                .map(find_project_configs)
                .unwrap_or_default(),
            explicit_files: self.explicit_files,
        };

        let files = sources
            .user_file
            .iter()
            .chain(&sources.project_files)
            .chain(&sources.explicit_files);
        let figment = files
            .fold(
                Figment::new().merge(Serialized::defaults(Config::default())),
                |figment, path| merge_file(figment, path),
            )
            .merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::debug!(
            primary = ?sources.primary_file(),
            corpus = ?config.corpus,
            "configuration loaded"
        );
        Ok((config, sources))
    }
}

/// Project files from the closest directory at or above `start` that has
/// any, stopping after the directory that holds [`PROJECT_ROOT_MARKER`].
fn find_project_configs(start: &Utf8Path) -> Vec<Utf8PathBuf> {
    for dir in start.ancestors() {
        let found: Vec<Utf8PathBuf> = PROJECT_STEMS
            .iter()
            .flat_map(|stem| {
                CONFIG_EXTENSIONS
                    .iter()
                    .map(move |ext| dir.join(format!("{stem}.{ext}")))
            })
            .filter(|path| path.is_file())
            .collect();
        if !found.is_empty() {
            return found;
        }
        if dir.join(PROJECT_ROOT_MARKER).exists() {
            break;
        }
    }
    Vec::new()
}

/// `config.<ext>` in the platform config directory
/// (`~/.config/jargon-grader/` on Linux).
fn find_user_config() -> Option<Utf8PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "jargon-grader")?;
    let dir = Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()?;
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

/// Unknown extensions (`--config settings.conf`) are read as TOML.
fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
        Some("json") => figment.merge(Json::file_exact(path.as_str())),
        _ => figment.merge(Toml::file_exact(path.as_str())),
    }
}
