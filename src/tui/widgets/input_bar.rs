// src/tui/widgets/input_bar.rs
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::{App, InputMode};

pub struct InputBarWidget;

impl InputBarWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let kb = &app.config.keybindings;

        let (title, text, input_style) = match app.input_mode {
            InputMode::Searching => (
                "Search (Enter to keep, Esc to clear)".to_string(),
                format!("{}>", app.current_input),
                Style::default().fg(theme.input_bar_text_fg).bg(theme.input_bar_background),
            ),
            InputMode::PageJump => {
                let pages = app
                    .tab()
                    .and_then(|t| t.controller.as_ref())
                    .map_or(0, |c| c.page_count());
                (
                    format!("Go to page (1-{}, Enter to jump, Esc to cancel)", pages),
                    format!("{}>", app.current_input),
                    Style::default().fg(theme.input_bar_text_fg).bg(theme.input_bar_background),
                )
            }
            InputMode::Normal | InputMode::ConfirmingDelete => (
                format!(
                    "'{}' search, '{}' filter, '{}' sort, '{}' approve, '{}' delete, '{}' help, '{}' quit",
                    kb.search, kb.filter, kb.sort, kb.approve, kb.delete, kb.help, kb.quit
                ),
                app.tab()
                    .and_then(|t| t.controller.as_ref())
                    .map(|c| c.state().search_term().to_string())
                    .unwrap_or_default(),
                Style::default().fg(theme.secondary_foreground).bg(theme.input_bar_background),
            ),
        };

        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.input_bar_border))
            .title(Line::from(Span::styled(
                title,
                Style::default().fg(theme.primary_foreground).bg(theme.input_bar_background),
            )))
            .style(Style::default().bg(theme.input_bar_background));

        f.render_widget(Paragraph::new(text).style(input_style).block(input_block), area);
    }
}
