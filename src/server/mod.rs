// src/server/mod.rs
// Collaborators that talk to the backend on behalf of a list view.

pub mod client;
pub mod csrf;
pub mod notify;

pub use client::{HttpMutationClient, MutationClient, Routes};
pub use csrf::CsrfTokenProvider;
pub use notify::{ChannelNotifier, Notifier, TracingNotifier};

use crate::errors::Result;
use crate::listview::{ActionKind, ListViewController, Notice, RecordId, RenderTarget};

/// Runs one approve/delete end to end: begin on the controller, send, apply
/// the outcome, notify. `Ok(None)` means the user declined a confirmation.
pub async fn perform_action<R: RenderTarget>(
    controller: &mut ListViewController<R>,
    client: &dyn MutationClient,
    notifier: &dyn Notifier,
    id: &RecordId,
    kind: ActionKind,
    confirmed: bool,
) -> Result<Option<Notice>> {
    let Some(ticket) = controller.begin_action(id, kind, confirmed)? else {
        return Ok(None);
    };
    let outcome = client.submit(ticket.clone()).await;
    let notice = controller.complete_action(&ticket, outcome);
    notifier.notify(&notice);
    Ok(Some(notice))
}
