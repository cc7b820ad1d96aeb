pub mod keyboard_handler;
pub use keyboard_handler::{KeyBinding, KeyboardHandler, ShortcutBinder};

pub mod utils;
pub use utils::*;
