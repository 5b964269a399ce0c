use chrono::Local;
use std::fmt::Write as _;
use tokio::sync::mpsc;
use tracing::{field::Field, Event, Level, Subscriber};
use tracing_subscriber::Layer;

use crate::tui::UILogEntry;

/// Collects the `message` plus any structured fields as `key=value` pairs.
#[derive(Default)]
struct LogEntryVisitor {
    message: Option<String>,
    fields: String,
}

impl LogEntryVisitor {
    fn push_field(&mut self, field: &Field, value: &str) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", field.name(), value);
    }

    fn into_message(self) -> Option<String> {
        match (self.message, self.fields.is_empty()) {
            (Some(message), true) => Some(message),
            (Some(message), false) => Some(format!("{} {}", message, self.fields)),
            (None, false) => Some(self.fields),
            (None, true) => None,
        }
    }
}

impl tracing::field::Visit for LogEntryVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        } else {
            self.push_field(field, &format!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.push_field(field, value);
        }
    }
}

/// Forwards every event to the in-app logs pane.
pub struct TuiLogCollectorLayer {
    sender: mpsc::UnboundedSender<UILogEntry>,
}

impl TuiLogCollectorLayer {
    pub fn new(sender: mpsc::UnboundedSender<UILogEntry>) -> Self {
        Self { sender }
    }
}

impl<S: Subscriber> Layer<S> for TuiLogCollectorLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let meta = event.metadata();
        let mut visitor = LogEntryVisitor::default();
        event.record(&mut visitor);

        let Some(message) = visitor.into_message() else {
            return;
        };
        let entry = UILogEntry {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            level: *meta.level(),
            target: meta.target().to_string(),
            message,
        };
        // Writing to stderr would corrupt the alternate screen; a closed
        // receiver just means the TUI has gone away.
        let _ = self.sender.send(entry);
    }
}
