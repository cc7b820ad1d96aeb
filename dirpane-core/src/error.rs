//! src/error.rs
//! ============================================================================
//! # `AppError`: Unified Error Type for the Directory Pane
//!
//! Every fallible operation in the crate returns `Result<T, AppError>`. The
//! three user-facing failure kinds (startup, directory access, deletion) are
//! first-class variants so the controller can report them without string
//! matching; the rest cover the ambient stack (config, logging, terminal).

use std::{io, path::PathBuf};
use thiserror::Error;

/// Unified error type for all directory pane operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// No initial directory could be determined.
    #[error("Startup failed: {reason}")]
    Startup { reason: String },

    /// Enumeration of a directory failed.
    #[error("Cannot access directory {path}: {reason}")]
    DirectoryAccess { path: String, reason: String },

    /// Deleting a path failed; the batch stopped at `path`.
    #[error("Failed to delete {path}: {reason}")]
    Deletion { path: String, reason: String },

    /// Standard IO error, auto-converted from `io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// TOML config parsing error.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// TOML config serialization error.
    #[error("Config serialize error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// Config file I/O error with path.
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid key binding or other config value.
    #[error("Invalid input: {field} - {message}")]
    InvalidInput { field: String, message: String },

    /// Logging subsystem could not be initialized.
    #[error("Logging error: {0}")]
    Logging(String),

    /// Any other error, with description.
    #[error("Unexpected error: {0}")]
    Other(String),
}

/// Coarse classification used when surfacing an error to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Startup,
    DirectoryAccess,
    Deletion,
    Internal,
}

impl AppError {
    /// Create a startup failure error
    pub fn startup<S: Into<String>>(reason: S) -> Self {
        Self::Startup {
            reason: reason.into(),
        }
    }

    /// Create a directory access failure error
    pub fn directory_access<P: Into<String>, S: Into<String>>(path: P, reason: S) -> Self {
        Self::DirectoryAccess {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a deletion failure error
    pub fn deletion<P: Into<String>, S: Into<String>>(path: P, reason: S) -> Self {
        Self::Deletion {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an input validation error
    pub fn invalid_input<S1: Into<String>, S2: Into<String>>(field: S1, message: S2) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Startup { .. } => FailureKind::Startup,
            Self::DirectoryAccess { .. } => FailureKind::DirectoryAccess,
            Self::Deletion { .. } => FailureKind::Deletion,
            _ => FailureKind::Internal,
        }
    }
}

// Allow conversion from `anyhow::Error` as fallback.
impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        Self::Other(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(AppError::startup("no exe").kind(), FailureKind::Startup);
        assert_eq!(
            AppError::directory_access("/a", "denied").kind(),
            FailureKind::DirectoryAccess
        );
        assert_eq!(
            AppError::deletion("/a/y", "busy").kind(),
            FailureKind::Deletion
        );
        assert_eq!(
            AppError::Other("cancelled".into()).kind(),
            FailureKind::Internal
        );
    }

    #[test]
    fn test_display_carries_path() {
        let err = AppError::deletion("/a/y", "Path does not exist");
        assert_eq!(err.to_string(), "Failed to delete /a/y: Path does not exist");
    }
}
