// dirpane-core/src/controller/handlers/keyboard_handler.rs
// Key mapping for the pane, per modal surface

use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, trace, warn};

use super::utils::{ctrl, is_quit_key, key};
use crate::config::KeysConfig;
use crate::controller::actions::Action;
use crate::controller::state_coordinator::StateCoordinator;
use crate::error::AppError;
use crate::model::fs_state::Listing;
use crate::model::selection::{SelectionInput, SelectionModel};
use crate::model::ui_state::UIOverlay;

/// A `[modifier+]key` binding such as `"delete"` or `"ctrl+d"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Shift is folded into the character for printable keys.
    #[must_use]
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if self.code != event.code {
            return false;
        }

        match event.code {
            KeyCode::Char(_) => {
                self.modifiers.difference(KeyModifiers::SHIFT)
                    == event.modifiers.difference(KeyModifiers::SHIFT)
            }
            _ => self.modifiers == event.modifiers,
        }
    }
}

impl FromStr for KeyBinding {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().to_ascii_lowercase();
        let invalid = |message: &str| AppError::invalid_input("keys", format!("{s:?}: {message}"));

        if raw.is_empty() {
            return Err(invalid("empty binding"));
        }

        // "+" alone, or a trailing "+", binds the plus key itself
        let (mods, key_name) = match raw.rsplit_once('+') {
            Some((mods, "")) => (mods.strip_suffix('+').unwrap_or(mods), "+"),
            Some((mods, key)) => (mods, key),
            None => ("", raw.as_str()),
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in mods.split('+').filter(|p| !p.is_empty()) {
            modifiers |= match part {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                other => return Err(invalid(&format!("unknown modifier '{other}'"))),
            };
        }

        let code = match key_name {
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "space" => KeyCode::Char(' '),
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            "insert" => KeyCode::Insert,
            name if name.len() > 1 && name.starts_with('f') => name[1..]
                .parse::<u8>()
                .ok()
                .filter(|n| (1..=12).contains(n))
                .map(KeyCode::F)
                .ok_or_else(|| invalid("unknown key"))?,
            name => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(invalid("unknown key")),
                }
            }
        };

        // Terminals report Shift+d as an uppercase 'D'
        let code = match code {
            KeyCode::Char(c) if modifiers.contains(KeyModifiers::SHIFT) => {
                KeyCode::Char(c.to_ascii_uppercase())
            }
            other => other,
        };

        Ok(Self::new(code, modifiers))
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            f.write_str("Alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            f.write_str("Shift+")?;
        }

        match self.code {
            KeyCode::Char(' ') => f.write_str("Space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::F(n) => write!(f, "F{n}"),
            KeyCode::Delete => f.write_str("Del"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Delete shortcut. It holds no selection of its own: every key event is
/// checked against the selection passed in at that moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutBinder {
    bindings: Vec<KeyBinding>,
}

impl ShortcutBinder {
    #[must_use]
    pub const fn new(bindings: Vec<KeyBinding>) -> Self {
        Self { bindings }
    }

    pub fn from_config(keys: &KeysConfig) -> Result<Self, AppError> {
        let bindings = keys
            .delete
            .iter()
            .map(|raw| raw.parse::<KeyBinding>())
            .collect::<Result<Vec<_>, _>>()?;

        // Quit keys are checked first in every mode and would never reach the shortcut
        if let Some(shadowed) = bindings
            .iter()
            .find(|binding| binding.matches(&key('q')) || binding.matches(&ctrl('c')))
        {
            return Err(AppError::invalid_input(
                "keys.delete",
                format!("{shadowed} is reserved for quit"),
            ));
        }

        if bindings.is_empty() {
            warn!("No delete key bound; the delete shortcut is disabled");
        }

        Ok(Self::new(bindings))
    }

    #[must_use]
    pub fn is_trigger(&self, event: &KeyEvent) -> bool {
        self.bindings.iter().any(|binding| binding.matches(event))
    }

    /// `None` if `event` is not a delete key. An empty selection consumes
    /// the key without effect.
    #[must_use]
    pub fn on_key(&self, event: &KeyEvent, selection: &SelectionModel) -> Option<Action> {
        if !self.is_trigger(event) {
            return None;
        }

        if selection.is_empty() {
            debug!("Delete shortcut with empty selection");
            return Some(Action::NoOp);
        }

        Some(Action::RequestDelete)
    }

    #[must_use]
    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }
}

impl Default for ShortcutBinder {
    fn default() -> Self {
        Self::new(vec![
            KeyBinding::new(KeyCode::Backspace, KeyModifiers::NONE),
            KeyBinding::new(KeyCode::Delete, KeyModifiers::NONE),
        ])
    }
}

/// Maps key presses to actions for whichever surface is on top.
#[derive(Debug, Clone, Default)]
pub struct KeyboardHandler {
    shortcuts: ShortcutBinder,
}

impl KeyboardHandler {
    #[must_use]
    pub const fn new(shortcuts: ShortcutBinder) -> Self {
        Self { shortcuts }
    }

    pub fn from_config(keys: &KeysConfig) -> Result<Self, AppError> {
        Ok(Self::new(ShortcutBinder::from_config(keys)?))
    }

    #[must_use]
    pub const fn shortcuts(&self) -> &ShortcutBinder {
        &self.shortcuts
    }

    pub fn handle_key(&self, event: KeyEvent, state: &StateCoordinator) -> Action {
        trace!(code = ?event.code, modifiers = ?event.modifiers, "Key event");

        if is_quit_key(&event) {
            return Action::Quit;
        }

        match state.overlay() {
            UIOverlay::ConfirmDelete => Self::handle_confirm_keys(event),
            UIOverlay::Notification => Self::handle_notification_keys(event),
            UIOverlay::None => self.handle_table_keys(event, state),
        }
    }

    fn handle_confirm_keys(event: KeyEvent) -> Action {
        match event.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => Action::ConfirmDelete,
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Action::DeclineDelete,
            _ => Action::NoOp,
        }
    }

    fn handle_notification_keys(event: KeyEvent) -> Action {
        match event.code {
            KeyCode::Enter | KeyCode::Esc => Action::DismissNotification,
            _ => Action::NoOp,
        }
    }

    fn handle_table_keys(&self, event: KeyEvent, state: &StateCoordinator) -> Action {
        if let Some(action) = self.shortcuts.on_key(&event, state.selection()) {
            return action;
        }

        let listing: &Listing = state.listing();
        let cursor: Option<usize> = state.ui().cursor();

        match event.code {
            KeyCode::Up | KeyCode::Char('k') => Action::MoveSelectionUp,
            KeyCode::Down | KeyCode::Char('j') => Action::MoveSelectionDown,
            KeyCode::Home => Action::SelectFirst,
            KeyCode::End => Action::SelectLast,

            KeyCode::Enter => cursor
                .and_then(|idx| listing.entries().get(idx))
                .map_or(Action::NoOp, |entry| Action::ActivateRow(entry.path.clone())),

            KeyCode::Char(' ') => toggled_selection(listing, state.selection(), cursor)
                .map_or(Action::NoOp, |ids| {
                    Action::SelectionChanged(SelectionInput::Many(ids))
                }),

            KeyCode::Char('a') => Action::SelectionChanged(SelectionInput::Many(
                listing
                    .entries()
                    .iter()
                    .filter(|entry| !entry.is_parent_link())
                    .map(|entry| entry.path.clone())
                    .collect(),
            )),

            _ => Action::NoOp,
        }
    }
}

/// The selection after flipping the cursor row, as the widget reports it.
/// The parent link is not selectable.
fn toggled_selection(
    listing: &Listing,
    selection: &SelectionModel,
    cursor: Option<usize>,
) -> Option<Vec<String>> {
    let entry = listing.entries().get(cursor?)?;

    if entry.is_parent_link() {
        return None;
    }

    let mut ids: Vec<String> = selection
        .iter()
        .filter(|path| *path != entry.path)
        .map(str::to_string)
        .collect();

    if !selection.contains(&entry.path) {
        ids.push(entry.path.clone());
    }

    Some(ids)
}
