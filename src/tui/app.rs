// src/tui/app.rs

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::widgets::{ListState, TableState};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, error, info, Level};

use crate::cli::mount_view;
use crate::config::{Config, KeyBindingsConfig};
use crate::errors::Result as RowdeckResult;
use crate::listview::{
    ActionKind, ActionResponse, ActionTicket, CategoryChoice, ListViewController, Notice, RecordId, SnapshotTarget,
};
use crate::server::{ChannelNotifier, MutationClient, Notifier, Routes};

use super::theme::AppTheme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Searching,
    PageJump,
    ConfirmingDelete,
}

// New struct for TUI log entries
#[derive(Clone, Debug)]
pub struct UILogEntry {
    pub timestamp: String,
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// Outcome of an approve/delete request, delivered back to the event loop.
pub enum AppEvent {
    ActionFinished {
        tab: usize,
        ticket: ActionTicket,
        outcome: RowdeckResult<ActionResponse>,
    },
}

/// A notice on screen until `expires_at`.
#[derive(Clone, Debug)]
pub struct Toast {
    pub notice: Notice,
    pub expires_at: Instant,
}

/// One configured view.
pub struct ViewTab {
    pub name: String,
    pub title: String,
    /// `None` when the view has no records to manage.
    pub controller: Option<ListViewController<SnapshotTarget>>,
    pub table_state: TableState,
    /// Index into the view's filter axes that the filter key cycles.
    pub focused_axis: usize,
}

impl ViewTab {
    pub fn new(name: &str, title: &str, controller: Option<ListViewController<SnapshotTarget>>) -> Self {
        let mut table_state = TableState::default();
        if controller.as_ref().is_some_and(|c| !c.visible_records().is_empty()) {
            table_state.select(Some(0));
        }
        Self {
            name: name.to_string(),
            title: title.to_string(),
            controller,
            table_state,
            focused_axis: 0,
        }
    }

    pub fn selected_id(&self) -> Option<RecordId> {
        let controller = self.controller.as_ref()?;
        let index = self.table_state.selected()?;
        controller.visible_records().get(index).map(|r| r.id().clone())
    }

    /// Keeps the row cursor inside the current page.
    pub fn clamp_selection(&mut self) {
        let rows = self.controller.as_ref().map_or(0, |c| c.visible_records().len());
        match self.table_state.selected() {
            _ if rows == 0 => self.table_state.select(None),
            Some(i) if i >= rows => self.table_state.select(Some(rows - 1)),
            None => self.table_state.select(Some(0)),
            Some(_) => {}
        }
    }

    fn move_selection(&mut self, forward: bool) {
        let rows = self.controller.as_ref().map_or(0, |c| c.visible_records().len());
        if rows == 0 {
            self.table_state.select(None);
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if forward => (i + 1) % rows,
            Some(i) => (i + rows - 1) % rows,
            None => 0,
        };
        self.table_state.select(Some(i));
    }
}

pub struct App {
    pub should_quit: bool,
    pub show_keybindings_modal: bool,
    pub show_logs: bool,
    pub input_mode: InputMode,
    pub current_input: String,
    pub tabs: Vec<ViewTab>,
    pub active_tab: usize,
    /// Record awaiting a delete confirmation.
    pub delete_candidate: Option<RecordId>,

    pub config: Arc<Config>,
    pub theme: Arc<AppTheme>,
    pub keybinding_map: HashMap<String, (KeyCode, KeyModifiers)>,

    pub log_entries: Vec<UILogEntry>,
    pub log_list_state: ListState,
    pub log_receiver: Option<mpsc::UnboundedReceiver<UILogEntry>>,

    pub toasts: Vec<Toast>,
    pub notifier: ChannelNotifier,
    pub notice_receiver: Option<mpsc::UnboundedReceiver<Notice>>,

    client: Arc<dyn MutationClient>,
    routes: Routes,

    // Channel for delivering async results to the event loop
    pub event_sender: mpsc::UnboundedSender<AppEvent>,
    pub event_receiver: Option<mpsc::UnboundedReceiver<AppEvent>>,
}

impl App {
    pub fn new(
        config: Arc<Config>,
        client: Arc<dyn MutationClient>,
        log_receiver: mpsc::UnboundedReceiver<UILogEntry>,
    ) -> Self {
        let tabs = config
            .views
            .iter()
            .map(|view| {
                let controller = match mount_view(&config, view) {
                    Ok(controller) => controller,
                    Err(e) => {
                        error!("View '{}' unavailable: {:#}", view.name, e);
                        None
                    }
                };
                if controller.is_none() {
                    info!("View '{}' has no records", view.name);
                }
                ViewTab::new(&view.name, view.title(), controller)
            })
            .collect();
        Self::with_tabs(config, tabs, client, Some(log_receiver))
    }

    pub fn with_tabs(
        config: Arc<Config>,
        tabs: Vec<ViewTab>,
        client: Arc<dyn MutationClient>,
        log_receiver: Option<mpsc::UnboundedReceiver<UILogEntry>>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();
        let (notice_tx, notice_rx) = mpsc::unbounded_channel::<Notice>();
        let keybinding_map = parse_keybindings(&config.keybindings);
        let routes = config.routes();
        Self {
            should_quit: false,
            show_keybindings_modal: false,
            show_logs: false,
            input_mode: InputMode::Normal,
            current_input: String::new(),
            tabs,
            active_tab: 0,
            delete_candidate: None,
            config,
            theme: Arc::new(AppTheme::default()),
            keybinding_map,
            log_entries: Vec::new(),
            log_list_state: ListState::default(),
            log_receiver,
            toasts: Vec::new(),
            notifier: ChannelNotifier::new(notice_tx),
            notice_receiver: Some(notice_rx),
            client,
            routes,
            event_sender: event_tx,
            event_receiver: Some(event_rx),
        }
    }

    pub fn tab(&self) -> Option<&ViewTab> {
        self.tabs.get(self.active_tab)
    }

    pub fn tab_mut(&mut self) -> Option<&mut ViewTab> {
        self.tabs.get_mut(self.active_tab)
    }

    fn controller_mut(&mut self) -> Option<&mut ListViewController<SnapshotTarget>> {
        self.tab_mut()?.controller.as_mut()
    }

    /// Runs `f` on the active controller, then re-seats the row cursor.
    fn with_controller<F>(&mut self, f: F)
    where
        F: FnOnce(&mut ListViewController<SnapshotTarget>),
    {
        if let Some(tab) = self.tab_mut() {
            if let Some(controller) = tab.controller.as_mut() {
                f(controller);
                tab.clamp_selection();
            }
        }
    }

    pub fn next_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.active_tab = (self.active_tab + 1) % self.tabs.len();
        }
    }

    pub fn previous_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.active_tab = (self.active_tab + self.tabs.len() - 1) % self.tabs.len();
        }
    }

    pub fn select_next_row(&mut self) {
        if let Some(tab) = self.tab_mut() {
            tab.move_selection(true);
        }
    }

    pub fn select_previous_row(&mut self) {
        if let Some(tab) = self.tab_mut() {
            tab.move_selection(false);
        }
    }

    pub fn next_page(&mut self) {
        self.with_controller(|c| {
            c.next_page();
        });
    }

    pub fn previous_page(&mut self) {
        self.with_controller(|c| {
            c.previous_page();
        });
    }

    // --- Search ---

    pub fn begin_search(&mut self) {
        if self.controller_mut().is_none() {
            return;
        }
        self.current_input = self
            .tab()
            .and_then(|t| t.controller.as_ref())
            .map(|c| c.state().search_term().to_string())
            .unwrap_or_default();
        self.input_mode = InputMode::Searching;
    }

    /// Live filtering: every keystroke re-runs the pipeline.
    pub fn update_search(&mut self) {
        let term = self.current_input.clone();
        self.with_controller(|c| c.set_search(&term));
    }

    pub fn cancel_search(&mut self) {
        self.current_input.clear();
        self.update_search();
        self.input_mode = InputMode::Normal;
    }

    // --- Filters, sort, page size ---

    /// Advances the focused axis: All, then each known choice, then All.
    pub fn cycle_filter(&mut self) {
        let Some(tab) = self.tab_mut() else { return };
        let Some(controller) = tab.controller.as_mut() else { return };
        let Some(axis) = controller.spec().axes.get(tab.focused_axis).cloned() else {
            return;
        };
        let next = match controller.state().filter(&axis.name) {
            CategoryChoice::All => axis.choices.first().cloned(),
            CategoryChoice::Only(current) => axis
                .choices
                .iter()
                .position(|c| c == current)
                .and_then(|i| axis.choices.get(i + 1))
                .cloned(),
        };
        let choice = next.map(CategoryChoice::Only).unwrap_or(CategoryChoice::All);
        debug!("Filter {} -> {}", axis.name, choice);
        if let Err(e) = controller.set_filter(&axis.name, choice) {
            error!("{}", e);
        }
        tab.clamp_selection();
    }

    pub fn focus_next_axis(&mut self) {
        if let Some(tab) = self.tab_mut() {
            let axes = tab.controller.as_ref().map_or(0, |c| c.spec().axes.len());
            if axes > 0 {
                tab.focused_axis = (tab.focused_axis + 1) % axes;
            }
        }
    }

    pub fn cycle_sort(&mut self) {
        self.with_controller(|c| {
            let keys: Vec<String> = c.spec().sort_options.iter().map(|o| o.key.clone()).collect();
            if keys.is_empty() {
                return;
            }
            let next = match keys.iter().position(|k| k == c.state().sort_key()) {
                Some(i) => (i + 1) % keys.len(),
                None => 0,
            };
            c.set_sort(&keys[next]);
        });
    }

    pub fn cycle_page_size(&mut self) {
        self.with_controller(|c| {
            let sizes = c.spec().page_sizes.clone();
            if sizes.is_empty() {
                return;
            }
            let next = match sizes.iter().position(|&s| s == c.state().page_size()) {
                Some(i) => (i + 1) % sizes.len(),
                None => 0,
            };
            c.set_page_size(sizes[next]);
        });
    }

    // --- Page jump ---

    pub fn begin_page_jump(&mut self) {
        if self.controller_mut().is_some() {
            self.current_input.clear();
            self.input_mode = InputMode::PageJump;
        }
    }

    pub fn submit_page_jump(&mut self) {
        let raw = std::mem::take(&mut self.current_input);
        self.input_mode = InputMode::Normal;
        let Some(controller) = self.controller_mut() else { return };
        let pages = controller.page_count();
        let valid = match raw.trim().parse::<usize>() {
            Ok(page) if (1..=pages).contains(&page) => {
                controller.go_to_page(page);
                true
            }
            _ => false,
        };
        if !valid {
            self.push_toast(Notice::error(format!("No page '{}' (1-{})", raw.trim(), pages)));
        }
        if let Some(tab) = self.tab_mut() {
            tab.clamp_selection();
        }
    }

    // --- Actions ---

    pub fn request_approve(&mut self) {
        self.start_action(ActionKind::Approve);
    }

    /// Asks for confirmation before deleting the selected record.
    pub fn request_delete(&mut self) {
        if !self.action_available(ActionKind::Delete) {
            return;
        }
        if let Some(id) = self.tab().and_then(ViewTab::selected_id) {
            self.delete_candidate = Some(id);
            self.input_mode = InputMode::ConfirmingDelete;
        }
    }

    pub fn resolve_delete(&mut self, confirmed: bool) {
        self.input_mode = InputMode::Normal;
        let Some(id) = self.delete_candidate.take() else { return };
        if !confirmed {
            debug!("Delete of {} declined", id);
        }
        // An unconfirmed delete still goes through the controller, which drops it.
        self.dispatch(id, ActionKind::Delete, confirmed);
    }

    fn action_available(&mut self, kind: ActionKind) -> bool {
        let Some(name) = self.tab().map(|t| t.name.clone()) else {
            return false;
        };
        if self.routes.supports(&name, kind) {
            true
        } else {
            self.push_toast(Notice::error(format!("{} is not available for {}", kind, name)));
            false
        }
    }

    fn start_action(&mut self, kind: ActionKind) {
        if !self.action_available(kind) {
            return;
        }
        if let Some(id) = self.tab().and_then(ViewTab::selected_id) {
            self.dispatch(id, kind, true);
        }
    }

    /// Begins the action on the controller and sends the request on a
    /// background task. The response comes back as `AppEvent::ActionFinished`.
    fn dispatch(&mut self, id: RecordId, kind: ActionKind, confirmed: bool) {
        let tab = self.active_tab;
        let Some(controller) = self.controller_mut() else { return };
        let ticket = match controller.begin_action(&id, kind, confirmed) {
            Ok(Some(ticket)) => ticket,
            Ok(None) => return,
            Err(e) => {
                self.push_toast(Notice::error(e.to_string()));
                return;
            }
        };
        info!("{} {} ({})", kind, ticket.id, ticket.request_id);
        let request = self.client.submit(ticket.clone());
        let sender = self.event_sender.clone();
        tokio::spawn(async move {
            let outcome = request.await;
            if sender.send(AppEvent::ActionFinished { tab, ticket, outcome }).is_err() {
                debug!("Event loop gone; dropping action result");
            }
        });
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ActionFinished { tab, ticket, outcome } => {
                let Some(view) = self.tabs.get_mut(tab) else { return };
                let Some(controller) = view.controller.as_mut() else { return };
                let notice = controller.complete_action(&ticket, outcome);
                view.clamp_selection();
                self.notifier.notify(&notice);
            }
        }
    }

    // --- Notices and logs ---

    pub fn push_toast(&mut self, notice: Notice) {
        let ttl = Duration::from_millis(self.config.interface.notice_ttl_ms);
        self.toasts.push(Toast {
            notice,
            expires_at: Instant::now() + ttl,
        });
    }

    /// Moves notices from the notifier channel onto the screen.
    pub fn drain_notices(&mut self) {
        let mut incoming = Vec::new();
        if let Some(receiver) = self.notice_receiver.as_mut() {
            while let Ok(notice) = receiver.try_recv() {
                incoming.push(notice);
            }
        }
        for notice in incoming {
            self.push_toast(notice);
        }
    }

    pub fn drain_logs(&mut self) {
        // Follow the tail unless the user scrolled up.
        let following = self
            .log_list_state
            .selected()
            .map_or(true, |index| index + 1 >= self.log_entries.len());
        if let Some(ref mut receiver) = self.log_receiver {
            while let Ok(log_entry) = receiver.try_recv() {
                self.log_entries.push(log_entry);
            }
        }
        let max_logs = self.config.interface.max_log_entries;
        if self.log_entries.len() > max_logs {
            let overflow = self.log_entries.len() - max_logs;
            self.log_entries.drain(0..overflow);
        }
        if following && !self.log_entries.is_empty() {
            self.log_list_state.select(Some(self.log_entries.len() - 1));
        }
    }

    pub fn scroll_logs_up(&mut self) {
        let current_selection = self.log_list_state.selected().unwrap_or(0);
        if current_selection > 0 {
            self.log_list_state.select(Some(current_selection - 1));
        }
    }

    pub fn scroll_logs_down(&mut self) {
        if self.log_entries.is_empty() {
            return;
        }
        let max_index = self.log_entries.len() - 1;
        let current_selection = self.log_list_state.selected().unwrap_or(0);
        if current_selection < max_index {
            self.log_list_state.select(Some(current_selection + 1));
        }
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        self.toasts.retain(|t| t.expires_at > now);
    }
}

pub fn parse_keybindings(cfg: &KeyBindingsConfig) -> HashMap<String, (KeyCode, KeyModifiers)> {
    let mut map = HashMap::new();
    for (action, binding) in cfg.entries() {
        match parse_keybinding(binding) {
            Some(parsed) => {
                map.insert(action.to_string(), parsed);
            }
            None => error!("Ignoring unparseable keybinding '{}' for {}", binding, action),
        }
    }
    map
}

pub fn parse_keybinding(s: &str) -> Option<(KeyCode, KeyModifiers)> {
    let s = s.trim();
    let mut mods = KeyModifiers::empty();
    let mut key = s;
    if let Some(stripped) = s.strip_prefix("Ctrl+") {
        mods |= KeyModifiers::CONTROL;
        key = stripped;
    }
    if let Some(stripped) = key.strip_prefix("Alt+") {
        mods |= KeyModifiers::ALT;
        key = stripped;
    }
    if let Some(stripped) = key.strip_prefix("Shift+") {
        mods |= KeyModifiers::SHIFT;
        key = stripped;
    }
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some((KeyCode::Char(c), mods));
    }
    let code = match key.to_lowercase().as_str() {
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        _ => return None,
    };
    Some((code, mods))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RowdeckError;
    use crate::listview::view::CategoryAxis;
    use crate::listview::{Record, RowSource, ViewSpec};
    use futures::future::{BoxFuture, FutureExt};
    use std::sync::Mutex;

    struct FakeClient {
        succeed: bool,
        seen: Mutex<Vec<ActionTicket>>,
    }

    impl MutationClient for FakeClient {
        fn submit(&self, ticket: ActionTicket) -> BoxFuture<'static, RowdeckResult<ActionResponse>> {
            self.seen.lock().unwrap().push(ticket);
            let outcome = if self.succeed {
                Ok(ActionResponse {
                    success: true,
                    message: None,
                })
            } else {
                Err(RowdeckError::HttpStatus { status: 500 })
            };
            futures::future::ready(outcome).boxed()
        }
    }

    fn leads_tab() -> ViewTab {
        let spec = ViewSpec::builder("leads")
            .search_fields(["name"])
            .axis(CategoryAxis::new("status", "status").with_choices(["new", "closed"]))
            .standard_sorts()
            .page_size(2)
            .page_sizes([2, 5])
            .build()
            .unwrap();
        let source = RowSource::new(
            (1..=5)
                .map(|i| {
                    Record::new(i.to_string().as_str())
                        .with("name", format!("Lead {}", i))
                        .with("date", i as i64)
                        .with("status", if i % 2 == 0 { "closed" } else { "new" })
                })
                .collect(),
        )
        .unwrap();
        ViewTab::new(
            "leads",
            "Leads",
            ListViewController::mount(spec, Some(source), SnapshotTarget::new()),
        )
    }

    fn app(succeed: bool) -> (App, Arc<FakeClient>) {
        let client = Arc::new(FakeClient {
            succeed,
            seen: Mutex::new(Vec::new()),
        });
        let app = App::with_tabs(
            Arc::new(Config::default()),
            vec![leads_tab(), ViewTab::new("projects", "Projects", None)],
            client.clone(),
            None,
        );
        (app, client)
    }

    fn controller(app: &App) -> &ListViewController<SnapshotTarget> {
        app.tabs[0].controller.as_ref().unwrap()
    }

    #[test]
    fn keybindings_keep_case_and_modifiers() {
        assert_eq!(parse_keybinding("F"), Some((KeyCode::Char('F'), KeyModifiers::empty())));
        assert_eq!(parse_keybinding("Ctrl+c"), Some((KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert_eq!(parse_keybinding("BackTab"), Some((KeyCode::BackTab, KeyModifiers::empty())));
        assert_eq!(parse_keybinding("Hyper+x"), None);
        let map = parse_keybindings(&KeyBindingsConfig::default());
        assert_eq!(map.get("search"), Some(&(KeyCode::Char('/'), KeyModifiers::empty())));
        assert_eq!(map.len(), KeyBindingsConfig::default().entries().len());
    }

    #[test]
    fn tabs_wrap_both_ways() {
        let (mut app, _) = app(true);
        app.previous_tab();
        assert_eq!(app.active_tab, 1);
        app.next_tab();
        assert_eq!(app.active_tab, 0);
    }

    #[test]
    fn filter_cycles_through_choices_and_back_to_all() {
        let (mut app, _) = app(true);
        app.cycle_filter();
        assert_eq!(controller(&app).filtered_len(), 3);
        app.cycle_filter();
        assert_eq!(controller(&app).filtered_len(), 2);
        app.cycle_filter();
        assert_eq!(controller(&app).filtered_len(), 5);
    }

    #[test]
    fn live_search_and_cancel() {
        let (mut app, _) = app(true);
        app.begin_search();
        assert_eq!(app.input_mode, InputMode::Searching);
        app.current_input.push_str("lead 4");
        app.update_search();
        assert_eq!(controller(&app).filtered_len(), 1);
        assert_eq!(app.tabs[0].selected_id(), Some(RecordId::from("4")));
        app.cancel_search();
        assert_eq!(controller(&app).filtered_len(), 5);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn sort_and_page_size_cycle() {
        let (mut app, _) = app(true);
        app.cycle_sort();
        assert_eq!(controller(&app).state().sort_key(), "oldest");
        assert_eq!(app.tabs[0].selected_id(), Some(RecordId::from("1")));
        app.cycle_page_size();
        assert_eq!(controller(&app).state().page_size(), 5);
        app.cycle_page_size();
        assert_eq!(controller(&app).state().page_size(), 2);
    }

    #[test]
    fn page_jump_reports_out_of_range() {
        let (mut app, _) = app(true);
        app.begin_page_jump();
        app.current_input.push('3');
        app.submit_page_jump();
        assert_eq!(controller(&app).state().current_page(), 3);
        app.begin_page_jump();
        app.current_input.push_str("9");
        app.submit_page_jump();
        assert_eq!(controller(&app).state().current_page(), 3);
        assert!(app.toasts.last().unwrap().notice.is_error());
    }

    #[test]
    fn unrouted_approve_is_refused_up_front() {
        // Default routes give leads a delete endpoint only.
        let (mut app, client) = app(true);
        app.request_approve();
        assert!(client.seen.lock().unwrap().is_empty());
        assert!(app.toasts[0].notice.is_error());
    }

    #[test]
    fn declined_delete_changes_nothing() {
        let (mut app, client) = app(true);
        app.request_delete();
        assert_eq!(app.input_mode, InputMode::ConfirmingDelete);
        assert_eq!(app.delete_candidate, Some(RecordId::from("5")));
        app.resolve_delete(false);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(client.seen.lock().unwrap().is_empty());
        assert_eq!(controller(&app).source().len(), 5);
    }

    #[tokio::test]
    async fn confirmed_delete_applies_when_the_response_arrives() {
        let (mut app, client) = app(true);
        let mut events = app.event_receiver.take().unwrap();
        app.request_delete();
        app.resolve_delete(true);
        assert!(controller(&app).is_pending(&RecordId::from("5")));
        assert_eq!(client.seen.lock().unwrap().len(), 1);

        let event = events.recv().await.unwrap();
        app.handle_app_event(event);
        app.drain_notices();
        assert_eq!(controller(&app).source().len(), 4);
        assert_eq!(app.tabs[0].selected_id(), Some(RecordId::from("4")));
        assert!(!app.toasts[0].notice.is_error());
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_record() {
        let (mut app, _) = app(false);
        let mut events = app.event_receiver.take().unwrap();
        app.request_delete();
        app.resolve_delete(true);
        app.handle_app_event(events.recv().await.unwrap());
        app.drain_notices();
        assert_eq!(controller(&app).source().len(), 5);
        assert!(!controller(&app).is_pending(&RecordId::from("5")));
        assert!(app.toasts[0].notice.is_error());
    }

    #[test]
    fn toasts_expire_on_tick() {
        let (mut app, _) = app(true);
        app.toasts.push(Toast {
            notice: Notice::success("old"),
            expires_at: Instant::now() - Duration::from_millis(1),
        });
        app.push_toast(Notice::success("fresh"));
        app.tick();
        assert_eq!(app.toasts.len(), 1);
        assert_eq!(app.toasts[0].notice.message, "fresh");
    }

    #[test]
    fn empty_view_ignores_list_keys() {
        let (mut app, _) = app(true);
        app.next_tab();
        app.cycle_filter();
        app.cycle_sort();
        app.begin_search();
        app.request_delete();
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.tab().unwrap().selected_id().is_none());
    }
}
