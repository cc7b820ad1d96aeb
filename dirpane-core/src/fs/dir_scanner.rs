//! ``src/fs/dir_scanner.rs``
//!
//! # `Directory Scanner`: Host-side Directory Enumeration
//!
//! Builds the ordered entry list for one directory: an optional `..` row,
//! then every child with its total size, largest first. The walk is
//! blocking and meant to run on `spawn_blocking`.

use std::{
    cmp::Ordering,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use crate::error::AppError;
use crate::fs::object_info::Entry;

/// Options controlling which rows a scan produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Include entries whose name starts with '.'.
    pub show_hidden: bool,

    /// Prepend a `..` row when the directory has a parent.
    pub include_parent_link: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            show_hidden: true,
            include_parent_link: true,
        }
    }
}

/// Scans `path` and returns its entries.
///
/// # Errors
/// `AppError::DirectoryAccess` if the path is missing, not a directory, or
/// unreadable. Unreadable children are skipped rather than failing the scan.
#[instrument(level = "info", skip(options), fields(entries_found))]
pub fn scan_dir(path: &str, options: ScanOptions) -> Result<Vec<Entry>, AppError> {
    let start_time: Instant = Instant::now();
    let dir_path: PathBuf = PathBuf::from(path);

    if !dir_path.exists() {
        return Err(AppError::directory_access(path, "Path does not exist"));
    }

    let dir_path: PathBuf = dir_path
        .canonicalize()
        .map_err(|e| AppError::directory_access(path, format!("Failed to resolve path: {e}")))?;

    if !dir_path.is_dir() {
        return Err(AppError::directory_access(path, "Not a directory"));
    }

    let mut items: Vec<Entry> = Vec::new();

    if options.include_parent_link
        && let Some(parent) = dir_path.parent()
    {
        items.push(Entry::parent_link(parent));
    }

    let read_dir = fs::read_dir(&dir_path)
        .map_err(|e| AppError::directory_access(path, format!("Failed to read directory: {e}")))?;

    let mut children: Vec<Entry> = Vec::new();

    for entry in read_dir {
        let entry = entry
            .map_err(|e| AppError::directory_access(path, format!("Failed to read entry: {e}")))?;
        let entry_path: PathBuf = entry.path();

        if !options.show_hidden && is_hidden(&entry_path) {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,

            Err(e) => {
                // Log the error but continue processing other entries
                debug!(path = %entry_path.display(), error = %e, "Skipping entry without metadata");
                continue;
            }
        };

        let size: u64 = if metadata.is_dir() {
            directory_size(&entry_path)
        } else {
            metadata.len()
        };

        children.push(Entry::from_path(&entry_path, size, metadata.is_dir()));
    }

    sort_entries(&mut children);
    items.extend(children);

    let duration: Duration = start_time.elapsed();
    tracing::Span::current().record("entries_found", items.len());

    info!(
        marker = "PERF_DIRECTORY_SCAN",
        path = %dir_path.display(),
        entries = items.len(),
        duration_ms = duration.as_millis(),
        "Directory scan completed in {:?}",
        duration
    );

    Ok(items)
}

/// Total size of every regular file below `path`. Unreadable parts count as 0.
#[must_use]
pub fn directory_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(OsStr::to_str)
        .is_some_and(|name| name.starts_with('.'))
}

// Largest first; equal sizes fall back to name so the order is stable.
fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a: &Entry, b: &Entry| -> Ordering {
        b.size_bytes
            .cmp(&a.size_bytes)
            .then_with(|| a.name.cmp(&b.name))
    });
}
