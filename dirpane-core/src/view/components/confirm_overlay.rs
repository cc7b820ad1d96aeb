//! src/view/components/confirm_overlay.rs
//!
//! Modal delete confirmation listing the paths about to go.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::fs::utils::normalize_display_path;
use crate::view::theme;

/// Paths listed before the prompt collapses the rest into "+N more".
const MAX_LISTED: usize = 8;

pub struct ConfirmOverlay;

impl ConfirmOverlay {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame<'_>, paths: &[String], area: Rect) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(format!(" Delete {} item(s)? ", paths.len()))
            .borders(Borders::ALL)
            .border_style(theme::confirm_border_style())
            .style(theme::base_style());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [list_area, hint_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);

        let mut items: Vec<ListItem> = paths
            .iter()
            .take(MAX_LISTED)
            .map(|path| ListItem::new(normalize_display_path(path).to_string()))
            .collect();

        if paths.len() > MAX_LISTED {
            items.push(
                ListItem::new(format!("+{} more", paths.len() - MAX_LISTED))
                    .style(theme::hint_style()),
            );
        }

        frame.render_widget(List::new(items), list_area);

        frame.render_widget(
            Paragraph::new("y/Enter: delete   n/Esc: cancel")
                .style(theme::hint_style())
                .alignment(Alignment::Center),
            hint_area,
        );
    }
}

impl Default for ConfirmOverlay {
    fn default() -> Self {
        Self::new()
    }
}
