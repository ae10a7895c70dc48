//! Configuration system for the `TaskFlow` terminal app.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/taskflow/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;
use std::time::Duration;

use crate::notify::DEFAULT_NOTIFICATION_TTL;
use crate::tasks::DEFAULT_STORAGE_KEY;
use crate::tasks::view::Filter;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// A filter name is not one of the known filters.
    #[error(transparent)]
    InvalidFilter(#[from] crate::tasks::view::ParseFilterError),

    /// Could not determine where to keep task data.
    #[error("could not determine data directory (no HOME or XDG_DATA_HOME); pass --data-dir")]
    NoDataDir,
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    storage: StorageFileConfig,
    ui: UiFileConfig,
}

/// `[storage]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct StorageFileConfig {
    data_dir: Option<PathBuf>,
    key: Option<String>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    notification_secs: Option<u64>,
    poll_timeout_ms: Option<u64>,
    default_filter: Option<String>,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Storage --
    /// Directory for task data; `None` means the platform data directory.
    pub data_dir: Option<PathBuf>,
    /// Key the task blob is stored under.
    pub storage_key: String,

    // -- UI --
    /// How long a notification stays visible.
    pub notification_ttl: Duration,
    /// Poll timeout for the TUI event loop.
    pub poll_timeout: Duration,
    /// Filter active at startup.
    pub default_filter: Filter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
            poll_timeout: Duration::from_millis(50),
            default_filter: Filter::All,
        }
    }
}

impl AppConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read
    /// or parsed, or if a filter name is unknown.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Self::resolve(cli, &file)
    }

    /// Resolve an `AppConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. Separated from `load()` so it can be
    /// tested without CLI parsing.
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let default_filter = match cli.filter.as_deref().or(file.ui.default_filter.as_deref()) {
            Some(name) => name.parse()?,
            None => defaults.default_filter,
        };

        Ok(Self {
            data_dir: cli
                .data_dir
                .clone()
                .or_else(|| file.storage.data_dir.clone()),
            storage_key: file
                .storage
                .key
                .clone()
                .unwrap_or(defaults.storage_key),
            notification_ttl: file
                .ui
                .notification_secs
                .map_or(defaults.notification_ttl, Duration::from_secs),
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
            default_filter,
        })
    }

    /// The directory task data lives in.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoDataDir`] if no directory was configured and
    /// the platform data directory is unknown.
    pub fn resolved_data_dir(&self) -> Result<PathBuf, ConfigError> {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("taskflow")))
            .ok_or(ConfigError::NoDataDir)
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal task tracker with local persistence")]
pub struct CliArgs {
    /// Directory for task data (default: platform data dir + `/taskflow`).
    #[arg(long, env = "TASKFLOW_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Filter to start with (all, completed, pending, high, overdue).
    #[arg(long)]
    pub filter: Option<String>,

    /// Path to config file (default: `~/.config/taskflow/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the filtered task list as an HTML fragment to this path and exit.
    #[arg(long, value_name = "PATH")]
    pub export_html: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TASKFLOW_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/taskflow.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("taskflow").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
