//! src/config.rs
//! ============================================================================
//! # Config: Application Configuration Loader and Saver
//!
//! Loads and saves settings as TOML from the platform config path using the
//! [`directories`](https://docs.rs/directories) crate. A missing file yields
//! the defaults, which are written back so users have something to edit.
//!
//! ## Example
//! ```rust,ignore
//! let config = Config::load().await?;
//! config.save().await?;
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tokio::fs as TokioFs;
use tracing::info;

use crate::error::AppError;

/// What the pane shows and where it starts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BrowserConfig {
    /// Start here instead of the executable's directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_directory: Option<PathBuf>,

    pub show_hidden: bool,

    /// Show a `..` row that navigates to the parent directory.
    pub show_parent_entry: bool,

    /// Drop selected paths that are not part of a newly adopted listing.
    pub prune_selection_on_navigate: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            initial_directory: None,
            show_hidden: true,
            show_parent_entry: true,
            prune_selection_on_navigate: true,
        }
    }
}

/// Key bindings, written as `[modifier+]key` (e.g. `"ctrl+d"`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeysConfig {
    pub delete: Vec<String>,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            delete: vec!["backspace".to_string(), "delete".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    /// Redraw interval when no events arrive.
    #[serde(with = "humantime_serde")]
    pub tick_rate: Duration,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Never,

    #[default]
    Daily,

    Hourly,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub level: String,

    /// Defaults to the platform data dir when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    pub file_prefix: String,

    pub rotation: LogRotation,

    /// Write JSON lines instead of plain text.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "dirpane".to_string(),
            rotation: LogRotation::Daily,
            json: true,
        }
    }
}

/// Main configuration struct for the application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub keys: KeysConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads config from the platform config dir, creating it with defaults if missing.
    ///
    /// The config is expected at `$XDG_CONFIG_HOME/dirpane/config.toml`
    /// (Linux), or equivalent on Windows/macOS.
    pub async fn load() -> Result<Self, AppError> {
        let path = Self::config_path()?;

        if TokioFs::try_exists(&path).await.unwrap_or(false) {
            return Self::load_from(&path).await;
        }

        info!(
            "No config file found at {}, using default configuration. Creating it now.",
            path.display()
        );

        let default_config = Self::default();
        default_config.save_to(&path).await?;

        Ok(default_config)
    }

    /// Loads config from an explicit file.
    pub async fn load_from(path: &Path) -> Result<Self, AppError> {
        info!("Loading config from {}", path.display());

        let text = TokioFs::read_to_string(path)
            .await
            .map_err(|source| AppError::ConfigIo {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_toml(&text)
    }

    /// Parses config text; absent sections and fields take their defaults.
    pub fn from_toml(text: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(text)?)
    }

    /// Saves config to the platform config dir.
    pub async fn save(&self) -> Result<(), AppError> {
        self.save_to(&Self::config_path()?).await
    }

    pub async fn save_to(&self, path: &Path) -> Result<(), AppError> {
        info!("Saving config to {}", path.display());

        if let Some(parent) = path.parent() {
            TokioFs::create_dir_all(parent)
                .await
                .map_err(|source| AppError::ConfigIo {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let toml_str = toml::to_string_pretty(self)?;

        TokioFs::write(path, toml_str)
            .await
            .map_err(|source| AppError::ConfigIo {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> Result<PathBuf, AppError> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Directory for rolling log files when `logging.directory` is unset.
    pub fn default_log_dir() -> Result<PathBuf, AppError> {
        Ok(Self::project_dirs()?.data_local_dir().join("logs"))
    }

    fn project_dirs() -> Result<ProjectDirs, AppError> {
        ProjectDirs::from("org", "dirpane", "dirpane")
            .ok_or_else(|| AppError::Other("Could not determine config directory.".to_string()))
    }
}
