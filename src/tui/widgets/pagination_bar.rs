use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::listview::paginate::PageControlKind;
use crate::listview::Region;
use crate::tui::App;

/// "Showing X of Y" on the left, page controls on the right.
pub struct PaginationBarWidget;

impl PaginationBarWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let Some(controller) = app.tab().and_then(|t| t.controller.as_ref()) else {
            return;
        };
        let target = controller.target();

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let showing = Line::from(vec![
            Span::styled("Showing ", theme.counter_label),
            Span::styled(target.text(&Region::ShowingCount).unwrap_or("0").to_string(), theme.counter_value),
            Span::styled(" of ", theme.counter_label),
            Span::styled(target.text(&Region::TotalCount).unwrap_or("0").to_string(), theme.counter_value),
            Span::styled(
                format!(" ({} matching)", target.text(&Region::FilteredCount).unwrap_or("0")),
                theme.counter_label,
            ),
        ]);
        f.render_widget(Paragraph::new(showing), chunks[0]);

        let mut spans = Vec::new();
        for control in target.children(&Region::Pagination) {
            let label = match control.kind {
                PageControlKind::Previous => "‹ Prev".to_string(),
                PageControlKind::Next => "Next ›".to_string(),
                PageControlKind::Page => control.label(),
            };
            let style: Style = if control.active {
                theme.page_active
            } else if control.disabled {
                theme.page_disabled
            } else {
                theme.page_normal
            };
            spans.push(Span::styled(format!(" {} ", label), style));
        }
        f.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
            chunks[1],
        );
    }
}
