//! UI state owned by the controller: table cursor, modal notifications,
//! and the redraw flag.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use compact_str::CompactString;
use ratatui::widgets::TableState;

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NotificationLevel {
    Info = 0,
    Success = 1,
    Warning = 2,
    Error = 3,
}

/// Compact notification with timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: CompactString,
    pub message: CompactString,
    pub level: NotificationLevel,
    pub timestamp: DateTime<Local>,
}

impl Notification {
    pub fn error(title: impl Into<CompactString>, message: impl Into<CompactString>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            level: NotificationLevel::Error,
            timestamp: Local::now(),
        }
    }
}

/// Modal surface currently covering the table, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UIOverlay {
    #[default]
    None,
    ConfirmDelete,
    Notification,
}

#[derive(Debug, Default)]
pub struct UIState {
    /// Cursor row of the table widget.
    pub table_state: TableState,

    /// Blocking notifications, oldest first. The front one is on screen.
    notifications: VecDeque<Notification>,

    /// Short non-modal message for the status line.
    pub status_message: Option<CompactString>,

    needs_redraw: bool,
}

impl UIState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            needs_redraw: true,
            ..Self::default()
        }
    }

    pub fn push_notification(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
        self.request_redraw();
    }

    #[must_use]
    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.front()
    }

    #[must_use]
    pub fn has_notification(&self) -> bool {
        !self.notifications.is_empty()
    }

    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.notifications.len()
    }

    /// Close the visible notification; the next queued one (if any) shows.
    pub fn dismiss_notification(&mut self) -> Option<Notification> {
        let dismissed = self.notifications.pop_front();
        self.request_redraw();
        dismissed
    }

    pub fn show_status(&mut self, message: impl Into<CompactString>) {
        self.status_message = Some(message.into());
        self.request_redraw();
    }

    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.table_state.selected()
    }

    /// Put the cursor on the first row, or nowhere for an empty table.
    pub fn reset_cursor(&mut self, rows: usize) {
        self.table_state.select((rows > 0).then_some(0));
        *self.table_state.offset_mut() = 0;
        self.request_redraw();
    }

    /// Keep the cursor inside `0..rows` after rows were removed.
    pub fn clamp_cursor(&mut self, rows: usize) {
        let clamped = match (self.table_state.selected(), rows) {
            (_, 0) => None,
            (Some(idx), _) => Some(idx.min(rows - 1)),
            (None, _) => Some(0),
        };
        self.table_state.select(clamped);
        self.request_redraw();
    }

    pub fn move_cursor(&mut self, delta: isize, rows: usize) {
        if rows == 0 {
            return;
        }

        let current = self.table_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(rows - 1);
        self.table_state.select(Some(next));
        self.request_redraw();
    }

    pub fn cursor_to_end(&mut self, rows: usize) {
        if rows > 0 {
            self.table_state.select(Some(rows - 1));
            self.request_redraw();
        }
    }

    #[inline]
    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    #[inline]
    #[must_use]
    pub const fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    #[inline]
    pub fn clear_redraw(&mut self) {
        self.needs_redraw = false;
    }
}
