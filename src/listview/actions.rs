// src/listview/actions.rs
// Server-confirmed mutations (approve, delete) and how their outcome lands in
// the controller.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::controller::ListViewController;
use super::record::RecordId;
use super::render::{Region, RenderTarget};
use super::sort::sort_field;
use crate::errors::{Result, RowdeckError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Approve,
    Delete,
}

impl ActionKind {
    pub fn requires_confirmation(self) -> bool {
        matches!(self, ActionKind::Delete)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Approve => "approve",
            ActionKind::Delete => "delete",
        }
    }

    fn default_success(self) -> &'static str {
        match self {
            ActionKind::Approve => "Approved successfully",
            ActionKind::Delete => "Deleted successfully",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body returned by a mutation endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// An accepted request, held while the server call is in flight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionTicket {
    pub view: String,
    pub id: RecordId,
    pub kind: ActionKind,
    pub request_id: Uuid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl<R: RenderTarget> ListViewController<R> {
    /// Marks `id` busy and hands back a ticket for the server call. Declining
    /// a delete confirmation yields `Ok(None)` and changes nothing.
    pub fn begin_action(&mut self, id: &RecordId, kind: ActionKind, confirmed: bool) -> Result<Option<ActionTicket>> {
        if self.source.find(id).is_none() {
            return Err(RowdeckError::RecordNotFound(id.to_string()));
        }
        if self.pending.contains(id) {
            return Err(RowdeckError::ActionPending(id.to_string()));
        }
        if kind.requires_confirmation() && !confirmed {
            debug!("{} of {} declined", kind, id);
            return Ok(None);
        }
        self.pending.insert(id.clone());
        let ticket = ActionTicket {
            view: self.spec.name.clone(),
            id: id.clone(),
            kind,
            request_id: Uuid::new_v4(),
        };
        debug!("Began {} of {} ({})", kind, id, ticket.request_id);
        Ok(Some(ticket))
    }

    /// Applies the server's answer. Anything short of `success: true` leaves
    /// the Row Source and View State as they were.
    pub fn complete_action(&mut self, ticket: &ActionTicket, outcome: Result<ActionResponse>) -> Notice {
        self.pending.remove(&ticket.id);
        match outcome {
            Ok(ActionResponse { success: true, message }) => {
                match ticket.kind {
                    ActionKind::Delete => self.apply_delete(&ticket.id),
                    ActionKind::Approve => self.apply_approve(&ticket.id),
                }
                info!("{} of {} in '{}' succeeded", ticket.kind, ticket.id, ticket.view);
                Notice::success(message.unwrap_or_else(|| ticket.kind.default_success().to_string()))
            }
            Ok(ActionResponse { success: false, message }) => {
                warn!("{} of {} rejected by server", ticket.kind, ticket.id);
                Notice::error(message.unwrap_or_else(|| format!("Could not {} record", ticket.kind)))
            }
            Err(e) => {
                warn!("{} of {} failed: {}", ticket.kind, ticket.id, e);
                Notice::error(format!("Could not {} record: {}", ticket.kind, e))
            }
        }
    }

    fn apply_delete(&mut self, id: &RecordId) {
        if self.source.remove(id).is_none() {
            warn!("Record {} was already gone", id);
            return;
        }
        self.target.remove(&Region::Row(id.clone()));
        self.refresh_preserving_page();
    }

    fn apply_approve(&mut self, id: &RecordId) {
        let Some(record) = self.source.find_mut(id) else {
            warn!("Record {} was already gone", id);
            return;
        };
        for (field, value) in &self.spec.approve_updates {
            record.set(field, value.clone());
        }
        if self.approve_touches_pipeline() {
            self.refresh_preserving_page();
        } else {
            self.publish_counters();
        }
    }

    // An approve changes the filtered set or its order only when an updated
    // field is under an active filter or is the active sort field.
    fn approve_touches_pipeline(&self) -> bool {
        let sorted_on = sort_field(&self.spec, self.state.sort_key());
        self.spec.approve_updates.iter().any(|(field, _)| {
            sorted_on == Some(field.as_str())
                || self
                    .spec
                    .axes
                    .iter()
                    .any(|axis| &axis.field == field && !self.state.filter(&axis.name).is_all())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listview::record::{Record, RowSource};
    use crate::listview::render::SnapshotTarget;
    use crate::listview::state::CategoryChoice;
    use crate::listview::view::{CategoryAxis, CounterSpec, ViewSpec};
    use proptest::prelude::*;

    fn agents() -> ViewSpec {
        ViewSpec::builder("agents")
            .search_fields(["name"])
            .axis(CategoryAxis::new("status", "status").with_default("pending"))
            .standard_sorts()
            .counter(CounterSpec::count("approved", "status", "approved"))
            .counter(CounterSpec::count("pending", "status", "pending").with_default("pending"))
            .on_approve("status", "approved")
            .build()
            .unwrap()
    }

    fn source(n: usize) -> RowSource {
        RowSource::new(
            (1..=n)
                .map(|i| {
                    Record::new(format!("a{}", i))
                        .with("name", format!("Agent {}", i))
                        .with("date", i as i64)
                        .with("status", "pending")
                })
                .collect(),
        )
        .unwrap()
    }

    fn view(n: usize) -> ListViewController<SnapshotTarget> {
        ListViewController::mount(agents(), Some(source(n)), SnapshotTarget::new()).unwrap()
    }

    fn ok() -> Result<ActionResponse> {
        Ok(ActionResponse {
            success: true,
            message: None,
        })
    }

    #[test]
    fn declined_delete_changes_nothing() {
        let mut v = view(3);
        let ticket = v.begin_action(&"a1".into(), ActionKind::Delete, false).unwrap();
        assert!(ticket.is_none());
        assert!(!v.is_pending(&"a1".into()));
        assert_eq!(v.source().len(), 3);
    }

    #[test]
    fn one_request_per_record() {
        let mut v = view(3);
        let ticket = v.begin_action(&"a1".into(), ActionKind::Approve, false).unwrap().unwrap();
        assert!(v.is_pending(&ticket.id));
        let again = v.begin_action(&"a1".into(), ActionKind::Approve, false);
        assert!(matches!(again, Err(RowdeckError::ActionPending(_))));
        assert!(v.begin_action(&"a2".into(), ActionKind::Approve, false).unwrap().is_some());
        assert!(matches!(
            v.begin_action(&"zz".into(), ActionKind::Approve, false),
            Err(RowdeckError::RecordNotFound(_))
        ));
    }

    #[test]
    fn delete_keeps_page_unless_it_vanishes() {
        let mut v = view(11);
        v.go_to_page(2);
        // Page 2 holds only a1; deleting it leaves one page.
        let ticket = v.begin_action(&"a1".into(), ActionKind::Delete, true).unwrap().unwrap();
        let notice = v.complete_action(&ticket, ok());
        assert_eq!(notice, Notice::success("Deleted successfully"));
        assert_eq!(v.source().len(), 10);
        assert_eq!(v.state().current_page(), 1);
        assert!(v.target().region(&Region::Row("a1".into())).is_none());
        assert_eq!(v.target().text(&Region::TotalCount), Some("10"));

        let mut v = view(25);
        v.go_to_page(2);
        let ticket = v.begin_action(&"a20".into(), ActionKind::Delete, true).unwrap().unwrap();
        v.complete_action(&ticket, ok());
        assert_eq!(v.state().current_page(), 2);
    }

    #[test]
    fn failures_leave_everything_untouched() {
        let mut v = view(3);
        let ticket = v.begin_action(&"a2".into(), ActionKind::Delete, true).unwrap().unwrap();
        let notice = v.complete_action(
            &ticket,
            Ok(ActionResponse {
                success: false,
                message: Some("Not allowed".into()),
            }),
        );
        assert_eq!(notice, Notice::error("Not allowed"));
        assert_eq!(v.source().len(), 3);
        assert!(!v.is_pending(&"a2".into()));

        let ticket = v.begin_action(&"a2".into(), ActionKind::Approve, false).unwrap().unwrap();
        let notice = v.complete_action(&ticket, Err(RowdeckError::HttpStatus { status: 500 }));
        assert!(notice.is_error());
        assert!(notice.message.contains("500"));
        assert_eq!(v.source().find(&"a2".into()).unwrap().text("status"), "pending");
    }

    #[test]
    fn approve_updates_counters_in_place() {
        let mut v = view(3);
        let ticket = v.begin_action(&"a3".into(), ActionKind::Approve, false).unwrap().unwrap();
        let notice = v.complete_action(
            &ticket,
            Ok(ActionResponse {
                success: true,
                message: Some("Agent approved".into()),
            }),
        );
        assert_eq!(notice.message, "Agent approved");
        assert_eq!(v.source().find(&"a3".into()).unwrap().text("status"), "approved");
        assert_eq!(v.target().text(&Region::Counter("approved".into())), Some("1"));
        assert_eq!(v.target().text(&Region::Counter("pending".into())), Some("2"));
        // No active status filter: the record stays where it was.
        assert_eq!(v.filtered_len(), 3);
    }

    #[test]
    fn approve_under_a_status_filter_reruns_the_pipeline() {
        let mut v = view(3);
        v.set_filter("status", CategoryChoice::parse("pending")).unwrap();
        let ticket = v.begin_action(&"a3".into(), ActionKind::Approve, false).unwrap().unwrap();
        v.complete_action(&ticket, ok());
        assert_eq!(v.filtered_len(), 2);
        assert!(!v.target().is_visible(&Region::Row("a3".into())));
    }

    #[test]
    fn response_body_parses_without_message() {
        let body: ActionResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(body.success);
        assert!(body.message.is_none());
    }

    proptest! {
        #[test]
        fn delete_removes_exactly_one(n in 1usize..30, pick in 0usize..30, size in 1usize..6) {
            let pick = pick % n;
            let mut v = view(n);
            v.set_page_size(size);
            let before: Vec<RecordId> = v.source().iter().map(|r| r.id().clone()).collect();
            let id = before[pick].clone();
            let ticket = v.begin_action(&id, ActionKind::Delete, true).unwrap().unwrap();
            v.complete_action(&ticket, ok());
            let after: Vec<RecordId> = v.source().iter().map(|r| r.id().clone()).collect();
            let mut expected = before.clone();
            expected.remove(pick);
            prop_assert_eq!(after, expected);
            prop_assert!(v.state().current_page() <= v.page_count().max(1));
        }
    }
}
