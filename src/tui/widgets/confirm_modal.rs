use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::centered_rect;
use crate::tui::App;

/// Delete confirmation. Only y confirms.
pub struct ConfirmModalWidget;

impl ConfirmModalWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let Some(id) = app.delete_candidate.as_ref() else {
            return;
        };
        let view = app.tab().map_or("", |t| t.title.as_str());

        let popup_area = centered_rect(area, 50, 7);
        f.render_widget(Clear, popup_area);
        let block = Block::default()
            .title("Confirm delete")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error_text))
            .style(Style::default().fg(theme.primary_foreground).bg(theme.popup_background))
            .title_alignment(Alignment::Center);

        let lines = vec![
            Line::from(vec![
                Span::raw("Delete record "),
                Span::styled(id.to_string(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!(" from {}?", view)),
            ]),
            Line::from("This cannot be undone."),
            Line::from(""),
            Line::from(Span::styled("y: delete   n/Esc: cancel", Style::default().fg(theme.help_text))),
        ];
        f.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block),
            popup_area,
        );
    }
}
