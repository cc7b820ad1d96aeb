//! src/controller/actions.rs
//! ============================================================================
//! # Actions: User Intent Reported to the Controller
//!
//! Raw terminal events are mapped to `Action`s by the keyboard handler; the
//! `StateCoordinator` is the only consumer. Host-call completions travel
//! separately as `TaskResult`s.

use crate::model::selection::SelectionInput;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Row activation (double-click equivalent) on the entry with this path.
    ActivateRow(String),

    /// The table widget reports a new selection.
    SelectionChanged(SelectionInput),

    /// Delete shortcut or explicit delete action.
    RequestDelete,

    /// Answer "yes" in the delete confirmation prompt.
    ConfirmDelete,

    /// Answer "no" in the delete confirmation prompt.
    DeclineDelete,

    /// Close the blocking notification on screen.
    DismissNotification,

    /// Move cursor up.
    MoveSelectionUp,

    /// Move cursor down.
    MoveSelectionDown,

    /// Jump to the first row.
    SelectFirst,

    /// Jump to the last row.
    SelectLast,

    /// Terminal resize.
    Resize(u16, u16),

    /// Periodic tick.
    Tick,

    /// Leave the application.
    Quit,

    /// Event consumed, nothing to do.
    NoOp,
}

impl Action {
    /// Actions that only move the cursor or redraw; they never touch
    /// Listing or Selection.
    #[must_use]
    pub const fn is_passive(&self) -> bool {
        matches!(
            self,
            Self::MoveSelectionUp
                | Self::MoveSelectionDown
                | Self::SelectFirst
                | Self::SelectLast
                | Self::Resize(..)
                | Self::Tick
                | Self::NoOp
        )
    }
}
