//! `src/fs/object_info.rs`
//! ============================================================
//! `Entry`: one file-system object as reported by the host.
//!
//! Entries are immutable once produced. `path` is the stable identifier
//! shared by the table widget, the selection model, and delete requests.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::util::humanize::format_size;

/// Display name of the synthetic row pointing at the parent directory.
pub const PARENT_LINK_NAME: &str = "..";

// ------------------------------------------------------------
// ObjectType: file or directory.
// ------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectType {
    Dir,
    File,
}

// Provide human-readable display strings.
impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dir => write!(f, "Dir"),
            Self::File => write!(f, "File"),
        }
    }
}

// ------------------------------------------------------------
// Entry: row data for one listing.
// ------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Absolute path, unique within a listing.
    pub path: String,

    pub name: String,

    pub size_bytes: u64,

    pub is_dir: bool,

    pub human_readable_size: String,
}

impl Entry {
    /// Build an entry, deriving the human-readable size.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        name: impl Into<String>,
        size_bytes: u64,
        is_dir: bool,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            size_bytes,
            is_dir,
            human_readable_size: format_size(size_bytes),
        }
    }

    /// Build the `..` row for `parent`.
    #[must_use]
    pub fn parent_link(parent: &Path) -> Self {
        Self {
            path: parent.to_string_lossy().into_owned(),
            name: PARENT_LINK_NAME.to_string(),
            size_bytes: 0,
            is_dir: true,
            human_readable_size: "-".to_string(),
        }
    }

    /// Build an entry for `path` with an already computed size.
    #[must_use]
    pub fn from_path(path: &Path, size_bytes: u64, is_dir: bool) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self::new(path.to_string_lossy().into_owned(), name, size_bytes, is_dir)
    }

    #[inline]
    #[must_use]
    pub const fn object_type(&self) -> ObjectType {
        if self.is_dir {
            ObjectType::Dir
        } else {
            ObjectType::File
        }
    }

    #[inline]
    #[must_use]
    pub fn is_parent_link(&self) -> bool {
        self.name == PARENT_LINK_NAME
    }
}
