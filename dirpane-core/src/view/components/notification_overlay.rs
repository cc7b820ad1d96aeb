//! src/view/components/notification_overlay.rs
//! Blocking error/notice dialog. Shows the oldest queued notification and
//! how many more are waiting behind it.

use crate::model::ui_state::{Notification, NotificationLevel};
use crate::view::theme;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tracing::instrument;

pub struct NotificationOverlay;

impl NotificationOverlay {
    pub fn new() -> Self {
        Self
    }

    #[instrument(level = "trace", skip_all, fields(level = ?notification.level, queued = queued))]
    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        notification: &Notification,
        queued: usize,
        area: Rect,
    ) {
        let (accent, glyph) = level_look(notification.level);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {glyph} {} ", notification.title))
            .title_style(Style::default().fg(accent).bold())
            .border_style(Style::default().fg(accent))
            .style(theme::base_style());

        let inner = block.inner(area);
        let [body, footer] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);

        frame.render_widget(Clear, area);
        frame.render_widget(block, area);

        frame.render_widget(
            Paragraph::new(notification.message.as_str())
                .style(Style::default().fg(theme::FOREGROUND))
                .wrap(Wrap { trim: true }),
            body,
        );

        let mut hint = format!(
            "{}  Enter/Esc to dismiss",
            notification.timestamp.format("%H:%M:%S")
        );
        if queued > 1 {
            hint.push_str(&format!(" ({} more)", queued - 1));
        }

        frame.render_widget(
            Paragraph::new(hint)
                .style(theme::hint_style())
                .alignment(Alignment::Center),
            footer,
        );
    }
}

impl Default for NotificationOverlay {
    fn default() -> Self {
        Self::new()
    }
}

fn level_look(level: NotificationLevel) -> (Color, &'static str) {
    match level {
        NotificationLevel::Info => (theme::CYAN, "i"),
        NotificationLevel::Success => (theme::GREEN, "✓"),
        NotificationLevel::Warning => (theme::YELLOW, "!"),
        NotificationLevel::Error => (theme::RED, "✕"),
    }
}
