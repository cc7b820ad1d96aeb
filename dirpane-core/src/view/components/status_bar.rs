//! src/view/components/status_bar.rs
//!
//! Two one-line bars around the table: the path header on top and the
//! selection/key-hint line at the bottom.

use crate::{
    controller::{action_dispatcher::StartupStatus, handlers::ShortcutBinder},
    model::{fs_state::Listing, selection::SelectionModel},
    view::theme,
};
use ratatui::{
    prelude::*,
    widgets::{Paragraph, Widget},
};

pub const PATH_HEADER_LABEL: &str = "Current Path: ";

/// Header text: the normalized path, or a placeholder before the first listing.
#[must_use]
pub fn path_header_text(listing: &Listing, startup: &StartupStatus) -> String {
    match (listing.current_path(), startup) {
        (Some(path), _) => format!("{PATH_HEADER_LABEL}{path}"),
        (None, StartupStatus::Failed) => format!("{PATH_HEADER_LABEL}(unavailable)"),
        (None, _) => format!("{PATH_HEADER_LABEL}…"),
    }
}

pub struct PathHeader;

impl PathHeader {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        listing: &Listing,
        startup: &StartupStatus,
        loading: bool,
        area: Rect,
    ) {
        let mut spans = vec![Span::styled(
            path_header_text(listing, startup),
            theme::header_style(),
        )];

        if loading {
            spans.push(Span::styled("  (loading…)", theme::loading_style()));
        }

        Paragraph::new(Line::from(spans))
            .style(theme::base_style())
            .render(area, frame.buffer_mut());
    }
}

impl Default for PathHeader {
    fn default() -> Self {
        Self::new()
    }
}

pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        selection: &SelectionModel,
        shortcuts: &ShortcutBinder,
        status_message: Option<&str>,
        area: Rect,
    ) {
        let delete_keys = shortcuts
            .bindings()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/");

        let left_text = match status_message {
            Some(message) => format!("Selected: {} | {message}", selection.len()),
            None => format!("Selected: {}", selection.len()),
        };

        let right_text =
            format!("Space select | a all | Enter open | {delete_keys} delete | q quit");

        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        Paragraph::new(left_text)
            .style(theme::base_style())
            .alignment(Alignment::Left)
            .render(layout[0], frame.buffer_mut());

        Paragraph::new(right_text)
            .style(theme::base_style().patch(theme::hint_style()))
            .alignment(Alignment::Right)
            .render(layout[1], frame.buffer_mut());
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}
