use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::tui::App;

pub struct KeybindingsModalWidget;

impl KeybindingsModalWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let popup_area = centered_rect(area, area.width / 2, area.height.saturating_mul(3) / 4);
        f.render_widget(Clear, popup_area);
        let block = Block::default()
            .title("Keybindings")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.popup_border))
            .style(Style::default().fg(theme.primary_foreground).bg(theme.popup_background))
            .title_alignment(Alignment::Center);
        f.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = app
            .config
            .keybindings
            .entries()
            .into_iter()
            .map(|(action, binding)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<12}", action.replace('_', " ")),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(binding.to_string()),
                ])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Esc to close",
            Style::default().fg(theme.help_text),
        )));
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
    }
}
