use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use std::sync::Arc;
use tracing::Level;

use crate::tui::App;

pub struct LogsWidget;

impl LogsWidget {
    pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
        let theme = Arc::clone(&app.theme);
        let log_items: Vec<ListItem> = app
            .log_entries
            .iter()
            .map(|log_entry| {
                let level_style = match log_entry.level {
                    Level::ERROR => theme.log_level_error,
                    Level::WARN => theme.log_level_warn,
                    Level::INFO => theme.log_level_info,
                    Level::DEBUG => theme.log_level_debug,
                    Level::TRACE => theme.log_level_trace,
                };
                let line = Line::from(vec![
                    Span::styled(format!("{} ", log_entry.timestamp), theme.log_timestamp),
                    Span::styled(
                        format!("{:<5} ", log_entry.level.as_str()),
                        level_style.add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("[{}] ", log_entry.target), theme.log_target),
                    Span::raw(log_entry.message.clone()),
                ]);
                ListItem::new(line)
            })
            .collect();

        let block = Block::default()
            .title(Span::styled("Logs", theme.log_title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_primary));

        if log_items.is_empty() {
            let placeholder = Paragraph::new("No log entries yet.")
                .block(block)
                .style(Style::default().fg(theme.tertiary_foreground));
            f.render_widget(placeholder, area);
        } else {
            let log_list = List::new(log_items)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            f.render_stateful_widget(log_list, area, &mut app.log_list_state);
        }
    }
}
