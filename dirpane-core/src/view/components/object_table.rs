//! src/view/components/object_table.rs

use crate::{
    fs::object_info::Entry,
    model::{fs_state::Listing, selection::SelectionModel},
    view::{icons, theme},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, HighlightSpacing, Row, Table, TableState},
};

pub struct ObjectTable;

impl ObjectTable {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        listing: &Listing,
        selection: &SelectionModel,
        table_state: &mut TableState,
        area: Rect,
    ) {
        let header = Row::new(vec!["", "Name", "Type", "Size"])
            .style(theme::column_header_style())
            .bottom_margin(1);

        let rows: Vec<Row> = listing
            .entries()
            .iter()
            .map(|entry| Self::row(entry, selection.contains(&entry.path)))
            .collect();

        let widths = [
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(5),
            Constraint::Length(12),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme::border_style())
                    .style(theme::base_style()),
            )
            .row_highlight_style(theme::cursor_style())
            .highlight_symbol("▶ ")
            .highlight_spacing(HighlightSpacing::Always);

        frame.render_stateful_widget(table, area, table_state);
    }

    fn row(entry: &Entry, marked: bool) -> Row<'static> {
        let (icon, style) = if entry.is_parent_link() {
            (icons::PARENT_ICON, theme::directory_style())
        } else if entry.is_dir {
            (icons::FOLDER_ICON, theme::directory_style())
        } else {
            (icons::FILE_ICON, theme::file_style())
        };

        let checkbox = match (entry.is_parent_link(), marked) {
            (true, _) => "",
            (false, true) => icons::CHECKED,
            (false, false) => icons::UNCHECKED,
        };

        Row::new(vec![
            Cell::from(checkbox),
            Cell::from(format!("{icon} {}", entry.name)),
            Cell::from(entry.object_type().to_string()),
            Cell::from(entry.human_readable_size.clone()),
        ])
        .style(if marked { theme::marked_style() } else { style })
    }
}

impl Default for ObjectTable {
    fn default() -> Self {
        Self::new()
    }
}
