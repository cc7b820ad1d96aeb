//! `src/operators/file_system_operator.rs`
//!
//! The host boundary. The controller never touches the filesystem itself;
//! it talks to a [`FileSystemService`] that exposes exactly three async
//! commands. [`LocalFileSystemOperator`] is the production implementation
//! backed by `tokio::fs` and the blocking directory scanner.

use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use tokio::fs as TokioFs;
use tokio::task::JoinError;
use tracing::{Span, error, info, instrument};

use crate::config::BrowserConfig;
use crate::error::AppError;
use crate::fs::dir_scanner::{ScanOptions, scan_dir};
use crate::fs::object_info::Entry;

/// Async command surface of the privileged host process.
#[async_trait]
pub trait FileSystemService: Send + Sync + Debug {
    /// List the entries of `path`.
    async fn enumerate(&self, path: &str) -> Result<Vec<Entry>, AppError>;

    /// Delete every path in `paths`. All-or-nothing from the caller's view.
    async fn delete(&self, paths: &[String]) -> Result<(), AppError>;

    /// Directory to show when the pane is first mounted.
    async fn initial_directory(&self) -> Result<String, AppError>;
}

/// Filesystem-backed implementation of [`FileSystemService`].
#[derive(Debug, Clone, Default)]
pub struct LocalFileSystemOperator {
    scan_options: ScanOptions,
    initial_directory: Option<PathBuf>,
}

impl LocalFileSystemOperator {
    #[must_use]
    pub const fn new(scan_options: ScanOptions, initial_directory: Option<PathBuf>) -> Self {
        Self {
            scan_options,
            initial_directory,
        }
    }

    #[must_use]
    pub fn from_config(browser: &BrowserConfig) -> Self {
        Self::new(
            ScanOptions {
                show_hidden: browser.show_hidden,
                include_parent_link: browser.show_parent_entry,
            },
            browser.initial_directory.clone(),
        )
    }

    #[instrument(
        name = "delete_operation",
        level = "info",
        fields(path = %path.display(), file_type),
        skip(self)
    )]
    async fn delete_operation(&self, path: &Path) -> Result<(), AppError> {
        let span: Span = Span::current();
        let display = path.to_string_lossy();

        let metadata = match TokioFs::symlink_metadata(path).await {
            Ok(metadata) => metadata,
            Err(_) => return Err(AppError::deletion(display, "Path does not exist")),
        };

        if metadata.is_dir() {
            span.record("file_type", "directory");

            TokioFs::remove_dir_all(path)
                .await
                .map_err(|e| AppError::deletion(display.as_ref(), e.to_string()))?;

            info!(path = %path.display(), "Directory deleted successfully");
        } else {
            span.record("file_type", "file");

            TokioFs::remove_file(path)
                .await
                .map_err(|e| AppError::deletion(display.as_ref(), e.to_string()))?;

            info!(path = %path.display(), "File deleted successfully");
        }

        Ok(())
    }
}

#[async_trait]
impl FileSystemService for LocalFileSystemOperator {
    #[instrument(name = "enumerate", level = "info", skip(self))]
    async fn enumerate(&self, path: &str) -> Result<Vec<Entry>, AppError> {
        let owned: String = path.to_string();
        let options: ScanOptions = self.scan_options;

        tokio::task::spawn_blocking(move || scan_dir(&owned, options))
            .await
            .map_err(|e| scan_aborted(path, &e))?
    }

    #[instrument(name = "delete", level = "info", skip(self), fields(count = paths.len()))]
    async fn delete(&self, paths: &[String]) -> Result<(), AppError> {
        let start_time = Instant::now();

        for path in paths {
            if let Err(e) = self.delete_operation(Path::new(path)).await {
                error!(path = %path, error = %e, "Deletion batch stopped");
                return Err(e);
            }
        }

        info!(
            count = paths.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Deletion batch completed"
        );
        Ok(())
    }

    #[instrument(name = "initial_directory", level = "info", skip(self))]
    async fn initial_directory(&self) -> Result<String, AppError> {
        if let Some(dir) = &self.initial_directory {
            return Ok(dir.to_string_lossy().into_owned());
        }

        let exe = std::env::current_exe()
            .map_err(|e| AppError::startup(format!("Failed to get executable directory: {e}")))?;

        let dir = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(dir.to_string_lossy().into_owned())
    }
}

/// A scan that panicked or was cancelled still reports as a directory failure.
fn scan_aborted(path: &str, e: &JoinError) -> AppError {
    AppError::directory_access(path, format!("Scan aborted: {e}"))
}

/// Service that never touches the disk, for controller unit tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct OfflineFileSystem;

#[cfg(test)]
#[async_trait]
impl FileSystemService for OfflineFileSystem {
    async fn enumerate(&self, path: &str) -> Result<Vec<Entry>, AppError> {
        Err(AppError::directory_access(path, "offline"))
    }

    async fn delete(&self, _paths: &[String]) -> Result<(), AppError> {
        Ok(())
    }

    async fn initial_directory(&self) -> Result<String, AppError> {
        Ok("/a".to_string())
    }
}
