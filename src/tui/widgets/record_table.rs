use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};
use std::sync::Arc;

use crate::cli::{cell_text, columns_for, fit_cell};
use crate::listview::{ListViewController, Region, SnapshotTarget};
use crate::tui::App;

pub struct RecordTableWidget;

impl RecordTableWidget {
    pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
        let theme = Arc::clone(&app.theme);
        let Some(tab) = app.tabs.get_mut(app.active_tab) else {
            f.render_widget(
                Paragraph::new("No views configured").style(theme.empty_state),
                area,
            );
            return;
        };

        let Some(controller) = tab.controller.as_ref() else {
            let block = Block::default()
                .title(Line::from(Span::styled(tab.title.clone(), theme.table_title)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_primary));
            f.render_widget(
                Paragraph::new("No records").style(theme.empty_state).block(block),
                area,
            );
            return;
        };

        let block = Block::default()
            .title(Line::from(vec![
                Span::styled(format!("{} ", tab.title), theme.table_title),
                Span::styled(Self::summary(controller, tab.focused_axis), Style::default().fg(theme.secondary_foreground)),
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_accent));

        if controller.target().is_visible(&Region::EmptyState) {
            f.render_widget(
                Paragraph::new("No matching records").style(theme.empty_state).block(block),
                area,
            );
            return;
        }

        let columns = columns_for(controller);
        let header = Row::new(columns.iter().map(|c| c.title.clone())).style(theme.table_header);
        let rows: Vec<Row> = controller
            .visible_records()
            .into_iter()
            .map(|record| {
                let busy = controller.is_pending(record.id());
                let cells = columns
                    .iter()
                    .map(|c| fit_cell(&cell_text(record, c), c.width as usize));
                let row = Row::new(cells);
                if busy {
                    row.style(theme.row_busy)
                } else {
                    row
                }
            })
            .collect();
        let widths: Vec<Constraint> = columns.iter().map(|c| Constraint::Length(c.width)).collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .highlight_style(theme.highlight_style)
            .highlight_symbol("> ");
        f.render_stateful_widget(table, area, &mut tab.table_state);
    }

    /// `search "x" | status: pending | sort: newest`, with the focused axis
    /// marked.
    fn summary(controller: &ListViewController<SnapshotTarget>, focused_axis: usize) -> String {
        let state = controller.state();
        let mut parts = Vec::new();
        if !state.search_term().is_empty() {
            parts.push(format!("search \"{}\"", state.search_term()));
        }
        for (i, axis) in controller.spec().axes.iter().enumerate() {
            let marker = if i == focused_axis { "*" } else { "" };
            parts.push(format!("{}{}: {}", marker, axis.name, state.filter(&axis.name)));
        }
        if !controller.spec().sort_options.is_empty() {
            parts.push(format!("sort: {}", state.sort_key()));
        }
        parts.push(format!("{} per page", state.page_size()));
        format!("[{}]", parts.join(" | "))
    }
}
