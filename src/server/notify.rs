// src/server/notify.rs

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::listview::{Notice, NoticeKind};

/// Fire-and-forget sink for action outcomes.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

// Server text may carry terminal escapes; never pass them through.
fn clean(message: &str) -> String {
    strip_ansi_escapes::strip_str(message).trim().to_string()
}

/// Notices as log lines. Used by headless commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.kind {
            NoticeKind::Success => info!("{}", clean(&notice.message)),
            NoticeKind::Error => error!("{}", clean(&notice.message)),
        }
    }
}

/// Forwards notices to the TUI event loop, which shows them as toasts.
#[derive(Clone, Debug)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl ChannelNotifier {
    pub fn new(tx: mpsc::UnboundedSender<Notice>) -> Self {
        Self { tx }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: &Notice) {
        let notice = Notice {
            kind: notice.kind,
            message: clean(&notice.message),
        };
        if self.tx.send(notice).is_err() {
            warn!("Notice dropped: receiver closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_notifier_strips_escapes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let notifier = ChannelNotifier::new(tx);
        notifier.notify(&Notice::error("\u{1b}[31mLead not found\u{1b}[0m"));
        let received = rx.try_recv().unwrap();
        assert_eq!(received, Notice::error("Lead not found"));
    }

    #[test]
    fn closed_channel_is_not_fatal() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        ChannelNotifier::new(tx).notify(&Notice::success("ok"));
    }
}
