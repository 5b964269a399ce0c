use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, InputMode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;

        let status_bar_style = Style::default()
            .fg(theme.status_bar_foreground)
            .bg(theme.status_bar_background);

        let status_bar_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
            .split(area);

        let mode_bg = match app.input_mode {
            InputMode::Normal => theme.status_bar_mode_normal_bg,
            InputMode::Searching => theme.status_bar_mode_search_bg,
            InputMode::PageJump => theme.status_bar_mode_page_jump_bg,
            InputMode::ConfirmingDelete => theme.status_bar_mode_confirm_delete_bg,
        };

        let mut left = vec![Span::styled("Rowdeck | ", status_bar_style)];
        for (i, tab) in app.tabs.iter().enumerate() {
            let style = if i == app.active_tab {
                theme.tab_active.bg(theme.status_bar_background)
            } else {
                theme.tab_inactive.bg(theme.status_bar_background)
            };
            let count = tab
                .controller
                .as_ref()
                .map_or_else(|| "-".to_string(), |c| c.source().len().to_string());
            left.push(Span::styled(format!("{} ({})", tab.title, count), style));
            left.push(Span::styled(" ", status_bar_style));
        }
        left.push(Span::styled("| ", status_bar_style));
        left.push(Span::styled(
            format!("{:?}", app.input_mode),
            Style::default().fg(theme.primary_foreground).bg(mode_bg).bold(),
        ));
        f.render_widget(Paragraph::new(Line::from(left)).style(status_bar_style), status_bar_layout[0]);

        f.render_widget(
            Paragraph::new(Line::from(Local::now().format("%H:%M:%S").to_string()))
                .style(status_bar_style)
                .alignment(Alignment::Right),
            status_bar_layout[1],
        );
    }
}
