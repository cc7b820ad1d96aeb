//! src/view/ui.rs
//! ============================================================
//! Frame renderer. Reads the controller's state and paints the header,
//! table, status line and whichever modal is on top. Never mutates the
//! model; only the table cursor's scroll offset is written back.

use ratatui::prelude::*;
use tracing::instrument;

use crate::{
    controller::{handlers::ShortcutBinder, state_coordinator::StateCoordinator},
    model::ui_state::UIOverlay,
    view::components::{
        confirm_overlay::ConfirmOverlay,
        notification_overlay::NotificationOverlay,
        object_table::ObjectTable,
        status_bar::{PathHeader, StatusBar},
    },
};

pub struct View {
    shortcuts: ShortcutBinder,
}

impl View {
    pub fn new(shortcuts: ShortcutBinder) -> Self {
        Self { shortcuts }
    }

    #[instrument(level = "trace", skip_all)]
    pub fn render(&self, f: &mut Frame<'_>, coord: &mut StateCoordinator) {
        let [header, table, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(f.area());

        PathHeader::new().render(
            f,
            coord.listing(),
            coord.startup_status(),
            coord.is_loading(),
            header,
        );

        let overlay = coord.overlay();

        {
            let (listing, selection, ui) = coord.render_parts();

            ObjectTable::new().render(f, listing, selection, &mut ui.table_state, table);

            StatusBar::new().render(
                f,
                selection,
                &self.shortcuts,
                ui.status_message.as_deref(),
                status,
            );
        }

        self.draw_overlay(f, coord, overlay);
    }

    fn draw_overlay(&self, f: &mut Frame<'_>, coord: &StateCoordinator, overlay: UIOverlay) {
        let scr = f.area();

        match overlay {
            UIOverlay::ConfirmDelete => {
                if let Some(paths) = coord.pending_delete() {
                    ConfirmOverlay::new().render(f, paths, centered(scr, 60, 50));
                }
            }

            UIOverlay::Notification => {
                if let Some(notification) = coord.ui().notification() {
                    NotificationOverlay::new().render(
                        f,
                        notification,
                        coord.ui().notification_count(),
                        centered(scr, 60, 30),
                    );
                }
            }

            UIOverlay::None => {}
        }
    }
}

impl Default for View {
    fn default() -> Self {
        Self::new(ShortcutBinder::default())
    }
}

fn centered(r: Rect, w_pct: u16, h_pct: u16) -> Rect {
    let w = percent_of(r.width, w_pct).max(20).min(r.width);
    let h = percent_of(r.height, h_pct).max(5).min(r.height);
    Rect {
        x: r.x + (r.width - w) / 2,
        y: r.y + (r.height - h) / 2,
        width: w,
        height: h,
    }
}

// Widened so large terminals cannot overflow the product.
fn percent_of(len: u16, pct: u16) -> u16 {
    u16::try_from(u32::from(len) * u32::from(pct) / 100).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BrowserConfig;
    use crate::controller::{actions::Action, event_loop::TaskResult};
    use crate::fs::object_info::Entry;
    use crate::operators::file_system_operator::OfflineFileSystem;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn screen_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn coordinator() -> (StateCoordinator, mpsc::UnboundedReceiver<TaskResult>) {
        let (task_tx, task_rx) = mpsc::unbounded_channel();
        let mut coord =
            StateCoordinator::mount(Arc::new(OfflineFileSystem), task_tx, &BrowserConfig::default());

        coord.apply_task_result(TaskResult::InitialDirectory {
            result: Ok("/a".to_string()),
        });
        coord.apply_task_result(TaskResult::DirectoryLoad {
            token: coord.latest_request(),
            path: "/a".to_string(),
            result: Ok(vec![
                Entry::new("/a/x", "x", 0, true),
                Entry::new("/a/y", "y", 10, false),
            ]),
            execution_time: Duration::ZERO,
        });
        (coord, task_rx)
    }

    #[test]
    fn test_centered_on_very_wide_terminal() {
        let area = centered(Rect::new(0, 0, 4000, 2000), 60, 50);

        assert_eq!(area, Rect::new(800, 500, 2400, 1000));
    }

    #[test]
    fn test_centered_never_exceeds_small_area() {
        let area = centered(Rect::new(0, 0, 10, 3), 60, 50);

        assert_eq!(area, Rect::new(0, 0, 10, 3));
    }

    #[tokio::test]
    async fn test_renders_header_rows_and_prompt() {
        let (mut coord, _rx) = coordinator();
        let view = View::default();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();

        terminal.draw(|f| view.render(f, &mut coord)).unwrap();
        let text = screen_text(terminal.backend().buffer());

        assert!(text.contains("Current Path: /a"));
        assert!(text.contains("10 B"));
        assert!(text.contains("Selected: 0"));

        coord.dispatch(Action::SelectionChanged("/a/y".into()));
        coord.dispatch(Action::RequestDelete);
        terminal.draw(|f| view.render(f, &mut coord)).unwrap();
        let text = screen_text(terminal.backend().buffer());

        assert!(text.contains("Delete 1 item(s)?"));
        assert!(text.contains("/a/y"));
    }
}
