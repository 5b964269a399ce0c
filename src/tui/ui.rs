use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use super::app::{App, InputMode};
use super::widgets::{
    confirm_modal::ConfirmModalWidget, input_bar::InputBarWidget,
    keybindings_modal::KeybindingsModalWidget, logs::LogsWidget, notices::NoticesWidget,
    pagination_bar::PaginationBarWidget, record_table::RecordTableWidget,
    stats_bar::StatsBarWidget, status_bar::StatusBarWidget,
};

pub fn ui(f: &mut Frame, app: &mut App) {
    let main_layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Input bar
        ])
        .split(f.size());

    StatusBarWidget::render(f, app, main_layout_chunks[0]);

    let content_area = if app.show_logs {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(main_layout_chunks[1]);
        LogsWidget::render(f, app, split[1]);
        split[0]
    } else {
        main_layout_chunks[1]
    };

    let view_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1), // Counters
            Constraint::Length(1), // Pagination
        ])
        .split(content_area);

    RecordTableWidget::render(f, app, view_chunks[0]);
    StatsBarWidget::render(f, app, view_chunks[1]);
    PaginationBarWidget::render(f, app, view_chunks[2]);

    InputBarWidget::render(f, app, main_layout_chunks[2]);

    NoticesWidget::render(f, app, main_layout_chunks[1]);
    if app.input_mode == InputMode::ConfirmingDelete {
        ConfirmModalWidget::render(f, app, f.size());
    }
    if app.show_keybindings_modal {
        KeybindingsModalWidget::render(f, app, f.size());
    }
}
