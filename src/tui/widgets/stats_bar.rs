use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::listview::Region;
use crate::tui::App;

pub struct StatsBarWidget;

impl StatsBarWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let Some(controller) = app.tab().and_then(|t| t.controller.as_ref()) else {
            return;
        };
        let mut spans = Vec::new();
        for counter in &controller.spec().counters {
            let value = controller
                .target()
                .text(&Region::Counter(counter.name.clone()))
                .unwrap_or("0")
                .to_string();
            spans.push(Span::styled(format!("{}: ", counter.name.replace('_', " ")), theme.counter_label));
            spans.push(Span::styled(value, theme.counter_value));
            spans.push(Span::raw("   "));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
