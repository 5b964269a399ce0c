use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::listview::NoticeKind;
use crate::tui::App;

const TOAST_WIDTH: u16 = 40;

/// Stacks live toasts in the top-right corner, newest last.
pub struct NoticesWidget;

impl NoticesWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let width = TOAST_WIDTH.min(area.width);
        if width < 6 {
            return;
        }
        let text_width = usize::from(width - 2);
        let mut y = area.y + 1;

        for toast in &app.toasts {
            let lines: Vec<Line> = textwrap::wrap(&toast.notice.message, text_width)
                .into_iter()
                .map(|l| Line::from(l.into_owned()))
                .collect();
            let height = lines.len() as u16 + 2;
            if y + height > area.y + area.height {
                break;
            }
            let (title, color) = match toast.notice.kind {
                NoticeKind::Success => ("Done", theme.success_text),
                NoticeKind::Error => ("Error", theme.error_text),
            };
            let rect = Rect {
                x: area.x + area.width - width,
                y,
                width,
                height,
            };
            f.render_widget(Clear, rect);
            f.render_widget(
                Paragraph::new(lines)
                    .style(Style::default().fg(theme.primary_foreground).bg(theme.popup_background))
                    .block(
                        Block::default()
                            .title(title)
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(color)),
                    ),
                rect,
            );
            y += height;
        }
    }
}
