//! src/view/icons.rs
//! ============================================================================
//! # Row Glyphs (Nerd Fonts)

pub const FOLDER_ICON: &str = "\u{f115}";
pub const FILE_ICON: &str = "\u{f15b}";
pub const PARENT_ICON: &str = "\u{f062}";

pub const CHECKED: &str = "[x]";
pub const UNCHECKED: &str = "[ ]";
