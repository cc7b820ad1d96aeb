//! src/logging.rs
//!
//! File-only tracing setup. The terminal belongs to the UI, so every event
//! goes to a rolling file through a non-blocking writer. The returned
//! `WorkerGuard` must live until shutdown or buffered lines are lost.

use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter, Layer, filter::Directive, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::{Config, LogRotation, LoggingConfig};
use crate::error::AppError;

const MAX_LOG_FILES: usize = 10;

// Logger builder
pub struct LoggerBuilder {
    config: LoggingConfig,
}

impl LoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: LoggingConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: LoggingConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: &str) -> Self {
        self.config.level = level.to_string();
        self
    }

    /// Resolve the directory log files are written to.
    pub fn log_dir(&self) -> Result<PathBuf, AppError> {
        match &self.config.directory {
            Some(dir) => Ok(dir.clone()),
            None => Config::default_log_dir(),
        }
    }

    /// Build the env filter; `RUST_LOG` wins over the configured level.
    pub fn env_filter(&self) -> Result<EnvFilter, AppError> {
        let directive = Directive::from_str(&self.config.level).map_err(|e| {
            AppError::invalid_input("logging.level", format!("{}: {e}", self.config.level))
        })?;

        Ok(EnvFilter::builder()
            .with_default_directive(directive)
            .from_env_lossy())
    }

    /// Install the global subscriber.
    pub fn build(self) -> Result<WorkerGuard, AppError> {
        let log_dir = self.log_dir()?;
        validate_log_directory(&log_dir)?;

        std::fs::create_dir_all(&log_dir).map_err(|e| {
            AppError::Logging(format!(
                "Failed to create log directory {}: {e}",
                log_dir.display()
            ))
        })?;

        let rotation = match self.config.rotation {
            LogRotation::Never => Rotation::NEVER,
            LogRotation::Daily => Rotation::DAILY,
            LogRotation::Hourly => Rotation::HOURLY,
        };

        let suffix = if self.config.json { "jsonl" } else { "log" };

        let file_appender = RollingFileAppender::builder()
            .rotation(rotation)
            .filename_prefix(self.config.file_prefix.as_str())
            .filename_suffix(suffix)
            .max_log_files(MAX_LOG_FILES)
            .build(&log_dir)
            .map_err(|e| AppError::Logging(format!("Failed to create file appender: {e}")))?;

        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let fmt_layer = if self.config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(non_blocking)
                .with_ansi(false)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .boxed()
        };

        tracing_subscriber::registry()
            .with(fmt_layer.with_filter(self.env_filter()?))
            .try_init()
            .map_err(|e| AppError::Logging(format!("Failed to install global subscriber: {e}")))?;

        Ok(guard)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_log_directory(path: &Path) -> Result<(), AppError> {
    if path.components().count() == 0 {
        return Err(AppError::invalid_input("logging.directory", "Empty path"));
    }

    if path.components().any(|c| c == Component::ParentDir) {
        return Err(AppError::invalid_input(
            "logging.directory",
            "Path contains parent directory references",
        ));
    }

    Ok(())
}

pub fn init_logging_with_config(config: LoggingConfig) -> Result<WorkerGuard, AppError> {
    LoggerBuilder::new().with_config(config).build()
}
