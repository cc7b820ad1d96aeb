//! Path helpers shared by the scanner and the controller.

/// Prefix Windows attaches to canonicalized paths to lift the `MAX_PATH` limit.
pub const LONG_PATH_PREFIX: &str = r"\\?\";

/// Strip the long-path marker for display.
///
/// Only the header shows the normalized form; host calls keep receiving the
/// raw string the service produced.
#[must_use]
pub fn normalize_display_path(path: &str) -> &str {
    path.strip_prefix(LONG_PATH_PREFIX).unwrap_or(path)
}
