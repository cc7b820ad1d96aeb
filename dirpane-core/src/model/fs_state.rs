//! ``src/model/fs_state.rs``
//! ============================================================================
//! # `Listing`: the directory currently on screen
//!
//! Holds the normalized path and the entries of the last successfully
//! completed enumeration. The entry vector is never edited in place: it is
//! either replaced by a new enumeration or narrowed after a deletion.

use indexmap::IndexSet;

use crate::fs::object_info::Entry;
use crate::fs::utils::normalize_display_path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Normalized path for display. `None` until the first adoption.
    current_path: Option<String>,

    entries: Vec<Entry>,
}

impl Listing {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the listing wholesale with an adopted enumeration of `raw_path`.
    pub fn replace(&mut self, raw_path: &str, entries: Vec<Entry>) {
        self.current_path = Some(normalize_display_path(raw_path).to_string());
        self.entries = entries;
    }

    /// Drop every entry whose path is in `deleted`. Returns how many went away.
    pub fn remove_paths(&mut self, deleted: &IndexSet<String>) -> usize {
        let before = self.entries.len();

        self.entries = std::mem::take(&mut self.entries)
            .into_iter()
            .filter(|entry| !deleted.contains(&entry.path))
            .collect();

        before - self.entries.len()
    }

    #[must_use]
    pub fn current_path(&self) -> Option<&str> {
        self.current_path.as_deref()
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn entry(&self, path: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.path == path)
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.entry(path).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True once any enumeration has been adopted.
    #[must_use]
    pub const fn is_populated(&self) -> bool {
        self.current_path.is_some()
    }
}
