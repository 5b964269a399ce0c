// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use xdg::BaseDirectories;

use crate::errors::RowdeckError;
use crate::feed::DEFAULT_ID_FIELD;
use crate::listview::view::{
    CategoryAxis, Column, CounterSpec, ShowingDenominator, ShowingNumerator, SortDirection, SortKind, SortOption,
    UnknownSort, ViewSpec, DEFAULT_MAX_VISIBLE_PAGES, DEFAULT_PAGE_SIZE,
};
use crate::listview::{ActionKind, FieldValue};
use crate::server::client::{Routes, ID_PLACEHOLDER};
use crate::server::csrf::DEFAULT_COOKIE_NAME;

pub const APP_NAME: &str = "rowdeck";
pub const DEFAULT_CONFIG_FILENAME: &str = "config.toml";

// Main configuration structure, mapping to config.toml
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub interface: InterfaceConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub keybindings: KeyBindingsConfig,
    #[serde(default = "default_views")]
    pub views: Vec<ViewConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct InterfaceConfig {
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    #[serde(default = "default_notice_ttl_ms")]
    pub notice_ttl_ms: u64,
    #[serde(default = "default_max_log_entries")]
    pub max_log_entries: usize,
}

fn default_refresh_interval_ms() -> u64 {
    250
}
fn default_notice_ttl_ms() -> u64 {
    4000
}
fn default_max_log_entries() -> usize {
    1000
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        InterfaceConfig {
            refresh_interval_ms: default_refresh_interval_ms(),
            notice_ttl_ms: default_notice_ttl_ms(),
            max_log_entries: default_max_log_entries(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Raw `Cookie` header. Falls back to `ROWDECK_COOKIE` when unset.
    #[serde(default)]
    pub cookie: Option<String>,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}
fn default_cookie_name() -> String {
    DEFAULT_COOKIE_NAME.to_string()
}
fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            base_url: default_base_url(),
            cookie: None,
            cookie_name: default_cookie_name(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String, // "trace", "debug", "info", "warn", "error"
    #[serde(default)]
    pub log_dir: Option<String>, // Path, can use ~
    #[serde(default = "default_rotate_daily")]
    pub rotate_daily: bool,
    /// Write the log file as JSON lines instead of plain text.
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_rotate_daily() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            log_dir: None,
            rotate_daily: default_rotate_daily(),
            json: false,
        }
    }
}

impl LoggingConfig {
    pub fn log_dir_path(&self) -> Option<PathBuf> {
        self.log_dir
            .as_deref()
            .map(|dir| PathBuf::from(shellexpand::tilde(dir).into_owned()))
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct KeyBindingsConfig {
    #[serde(default = "default_quit")] pub quit: String,
    #[serde(default = "default_help")] pub help: String,
    #[serde(default = "default_next_tab")] pub next_tab: String,
    #[serde(default = "default_prev_tab")] pub prev_tab: String,
    #[serde(default = "default_up")] pub up: String,
    #[serde(default = "default_down")] pub down: String,
    #[serde(default = "default_next_page")] pub next_page: String,
    #[serde(default = "default_prev_page")] pub prev_page: String,
    #[serde(default = "default_jump_page")] pub jump_page: String,
    #[serde(default = "default_search")] pub search: String,
    #[serde(default = "default_filter")] pub filter: String,
    #[serde(default = "default_next_axis")] pub next_axis: String,
    #[serde(default = "default_sort")] pub sort: String,
    #[serde(default = "default_page_size_key")] pub page_size: String,
    #[serde(default = "default_approve")] pub approve: String,
    #[serde(default = "default_delete")] pub delete: String,
    #[serde(default = "default_logs")] pub logs: String,
}

fn default_quit() -> String { "q".to_string() }
fn default_help() -> String { "?".to_string() }
fn default_next_tab() -> String { "Tab".to_string() }
fn default_prev_tab() -> String { "BackTab".to_string() }
fn default_up() -> String { "Up".to_string() }
fn default_down() -> String { "Down".to_string() }
fn default_next_page() -> String { "Right".to_string() }
fn default_prev_page() -> String { "Left".to_string() }
fn default_jump_page() -> String { "g".to_string() }
fn default_search() -> String { "/".to_string() }
fn default_filter() -> String { "f".to_string() }
fn default_next_axis() -> String { "F".to_string() }
fn default_sort() -> String { "s".to_string() }
fn default_page_size_key() -> String { "p".to_string() }
fn default_approve() -> String { "a".to_string() }
fn default_delete() -> String { "d".to_string() }
fn default_logs() -> String { "l".to_string() }

impl Default for KeyBindingsConfig {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            help: default_help(),
            next_tab: default_next_tab(),
            prev_tab: default_prev_tab(),
            up: default_up(),
            down: default_down(),
            next_page: default_next_page(),
            prev_page: default_prev_page(),
            jump_page: default_jump_page(),
            search: default_search(),
            filter: default_filter(),
            next_axis: default_next_axis(),
            sort: default_sort(),
            page_size: default_page_size_key(),
            approve: default_approve(),
            delete: default_delete(),
            logs: default_logs(),
        }
    }
}

impl KeyBindingsConfig {
    /// (action, binding) pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("quit", self.quit.as_str()),
            ("help", self.help.as_str()),
            ("next_tab", self.next_tab.as_str()),
            ("prev_tab", self.prev_tab.as_str()),
            ("up", self.up.as_str()),
            ("down", self.down.as_str()),
            ("next_page", self.next_page.as_str()),
            ("prev_page", self.prev_page.as_str()),
            ("jump_page", self.jump_page.as_str()),
            ("search", self.search.as_str()),
            ("filter", self.filter.as_str()),
            ("next_axis", self.next_axis.as_str()),
            ("sort", self.sort.as_str()),
            ("page_size", self.page_size.as_str()),
            ("approve", self.approve.as_str()),
            ("delete", self.delete.as_str()),
            ("logs", self.logs.as_str()),
        ]
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FilterAxisConfig {
    pub name: String,
    /// Record field read by this axis; the axis name when unset.
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub choices: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SortConfig {
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
    pub field: String,
    #[serde(default = "default_sort_kind")]
    pub kind: SortKind,
    #[serde(default = "default_sort_direction")]
    pub direction: SortDirection,
}

fn default_sort_kind() -> SortKind {
    SortKind::Numeric
}
fn default_sort_direction() -> SortDirection {
    SortDirection::Descending
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CounterKindConfig {
    #[default]
    Count,
    Sum,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CounterConfig {
    pub name: String,
    pub field: String,
    #[serde(default)]
    pub kind: CounterKindConfig,
    /// Value counted by a `count` counter.
    #[serde(default)]
    pub value: Option<String>,
    /// Value assumed for records lacking `field`.
    #[serde(default)]
    pub default: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ShowingConfig {
    #[serde(default = "default_showing_numerator")]
    pub numerator: ShowingNumerator,
    #[serde(default = "default_showing_denominator")]
    pub denominator: ShowingDenominator,
}

fn default_showing_numerator() -> ShowingNumerator {
    ShowingNumerator::WindowLength
}
fn default_showing_denominator() -> ShowingDenominator {
    ShowingDenominator::Source
}

impl Default for ShowingConfig {
    fn default() -> Self {
        Self {
            numerator: default_showing_numerator(),
            denominator: default_showing_denominator(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ViewConfig {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    /// JSON feed. Defaults to `<name>.json` under the XDG data directory.
    #[serde(default)]
    pub feed: Option<String>,
    #[serde(default = "default_id_field")]
    pub id_field: String,
    #[serde(default)]
    pub search_fields: Vec<String>,
    #[serde(default)]
    pub filters: Vec<FilterAxisConfig>,
    #[serde(default = "default_standard_sorts")]
    pub standard_sorts: bool,
    /// Numeric fields that get a `<field>_high` / `<field>_low` sort pair.
    #[serde(default)]
    pub measures: Vec<String>,
    #[serde(default)]
    pub sorts: Vec<SortConfig>,
    #[serde(default = "default_sort_key")]
    pub default_sort: String,
    #[serde(default = "default_unknown_sort")]
    pub unknown_sort: UnknownSort,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_page_sizes")]
    pub page_sizes: Vec<usize>,
    #[serde(default = "default_max_visible_pages")]
    pub max_visible_pages: usize,
    #[serde(default)]
    pub showing: ShowingConfig,
    #[serde(default)]
    pub counters: Vec<CounterConfig>,
    #[serde(default)]
    pub approve_path: Option<String>,
    #[serde(default)]
    pub delete_path: Option<String>,
    #[serde(default)]
    pub approve_updates: BTreeMap<String, FieldValue>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

fn default_id_field() -> String {
    DEFAULT_ID_FIELD.to_string()
}
fn default_standard_sorts() -> bool {
    true
}
fn default_sort_key() -> String {
    "newest".to_string()
}
fn default_unknown_sort() -> UnknownSort {
    UnknownSort::Newest
}
fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}
fn default_page_sizes() -> Vec<usize> {
    vec![10, 25, 50]
}
fn default_max_visible_pages() -> usize {
    DEFAULT_MAX_VISIBLE_PAGES
}

impl ViewConfig {
    fn named(name: &str, title: &str) -> Self {
        Self {
            name: name.to_string(),
            title: Some(title.to_string()),
            feed: None,
            id_field: default_id_field(),
            search_fields: Vec::new(),
            filters: Vec::new(),
            standard_sorts: default_standard_sorts(),
            measures: Vec::new(),
            sorts: Vec::new(),
            default_sort: default_sort_key(),
            unknown_sort: default_unknown_sort(),
            page_size: default_page_size(),
            page_sizes: default_page_sizes(),
            max_visible_pages: default_max_visible_pages(),
            showing: ShowingConfig::default(),
            counters: Vec::new(),
            approve_path: None,
            delete_path: None,
            approve_updates: BTreeMap::new(),
            columns: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    pub fn to_spec(&self) -> crate::errors::Result<ViewSpec> {
        let invalid = |message: String| RowdeckError::InvalidView {
            view: self.name.clone(),
            message,
        };
        for path in [&self.approve_path, &self.delete_path].into_iter().flatten() {
            if !path.contains(ID_PLACEHOLDER) {
                return Err(invalid(format!("endpoint '{}' has no {} placeholder", path, ID_PLACEHOLDER)));
            }
        }

        let mut builder = ViewSpec::builder(&self.name)
            .search_fields(self.search_fields.iter().cloned())
            .default_sort(&self.default_sort)
            .unknown_sort(self.unknown_sort)
            .page_size(self.page_size)
            .page_sizes(self.page_sizes.iter().copied())
            .max_visible_pages(self.max_visible_pages)
            .showing(self.showing.numerator, self.showing.denominator);

        for axis in &self.filters {
            let mut category = CategoryAxis::new(&axis.name, axis.field.as_deref().unwrap_or(&axis.name))
                .with_choices(axis.choices.iter().cloned());
            if let Some(default) = &axis.default {
                category = category.with_default(default);
            }
            builder = builder.axis(category);
        }

        if self.standard_sorts {
            builder = builder.standard_sorts();
        }
        for measure in &self.measures {
            builder = builder.sorts(SortOption::measure(measure));
        }
        for sort in &self.sorts {
            let label = sort.label.as_deref().unwrap_or(&sort.key);
            builder = builder.sort(SortOption::new(&sort.key, label, &sort.field, sort.kind, sort.direction));
        }

        for counter in &self.counters {
            let spec = match counter.kind {
                CounterKindConfig::Sum => CounterSpec::sum(&counter.name, &counter.field),
                CounterKindConfig::Count => {
                    let value = counter
                        .value
                        .as_deref()
                        .ok_or_else(|| invalid(format!("count counter '{}' needs a value", counter.name)))?;
                    let spec = CounterSpec::count(&counter.name, &counter.field, value);
                    match &counter.default {
                        Some(default) => spec.with_default(default),
                        None => spec,
                    }
                }
            };
            builder = builder.counter(spec);
        }

        for (field, value) in &self.approve_updates {
            builder = builder.on_approve(field, value.clone());
        }
        for column in &self.columns {
            builder = builder.column(column.clone());
        }
        builder.build()
    }
}

fn count(name: &str, field: &str, value: &str, default: Option<&str>) -> CounterConfig {
    CounterConfig {
        name: name.to_string(),
        field: field.to_string(),
        kind: CounterKindConfig::Count,
        value: Some(value.to_string()),
        default: default.map(str::to_string),
    }
}

fn status_axis(default: Option<&str>, choices: &[&str]) -> FilterAxisConfig {
    FilterAxisConfig {
        name: "status".to_string(),
        field: None,
        default: default.map(str::to_string),
        choices: choices.iter().map(|c| c.to_string()).collect(),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// The four admin lists the console ships with.
fn default_views() -> Vec<ViewConfig> {
    let mut agents = ViewConfig::named("agents", "Agents");
    agents.search_fields = strings(&["name", "email", "phone"]);
    agents.filters = vec![status_axis(None, &["pending", "approved"])];
    agents.showing = ShowingConfig {
        numerator: ShowingNumerator::WindowLength,
        denominator: ShowingDenominator::Filtered,
    };
    agents.counters = vec![
        count("approved", "approved", "true", None),
        count("pending", "approved", "false", None),
        CounterConfig {
            name: "leads".to_string(),
            field: "leads".to_string(),
            kind: CounterKindConfig::Sum,
            value: None,
            default: None,
        },
    ];
    agents.approve_path = Some("/approve-agent/{id}/".to_string());
    agents.approve_updates = BTreeMap::from([
        ("status".to_string(), FieldValue::from("approved")),
        ("approved".to_string(), FieldValue::Bool(true)),
    ]);
    agents.columns = vec![
        Column::new("Name", "name", 22),
        Column::new("Email", "email", 28),
        Column::new("Phone", "phone", 14),
        Column::new("Status", "status", 10),
        Column::new("Leads", "leads", 6),
    ];

    let mut leads = ViewConfig::named("leads", "Leads");
    leads.search_fields = strings(&["name", "email", "phone", "city", "agent"]);
    leads.filters = vec![status_axis(None, &["new", "in_progress", "closed"])];
    leads.measures = strings(&["budget"]);
    leads.showing.numerator = ShowingNumerator::WindowEnd;
    leads.counters = vec![
        count("new", "status", "new", Some("new")),
        count("in_progress", "status", "in_progress", Some("new")),
        count("closed", "status", "closed", Some("new")),
    ];
    leads.delete_path = Some("/delete-lead/{id}/".to_string());
    leads.columns = vec![
        Column::new("Name", "name", 20),
        Column::new("Phone", "phone", 14),
        Column::new("City", "city", 12),
        Column::new("Agent", "agent", 16),
        Column::new("Budget", "budget", 12),
        Column::new("Status", "status", 12),
    ];

    let mut projects = ViewConfig::named("projects", "Projects");
    projects.search_fields = strings(&["name", "location", "type"]);
    projects.filters = vec![
        status_axis(Some("ongoing"), &["ongoing", "ready_to_move", "under_construction", "upcoming"]),
        FilterAxisConfig {
            name: "type".to_string(),
            field: None,
            default: None,
            choices: strings(&["residential", "commercial", "plots"]),
        },
    ];
    projects.measures = strings(&["plots"]);
    projects.counters = vec![
        count("ready_to_move", "status", "ready_to_move", Some("ongoing")),
        count("under_construction", "status", "under_construction", Some("ongoing")),
        count("upcoming", "status", "upcoming", Some("ongoing")),
    ];
    projects.delete_path = Some("/delete-project/{id}/".to_string());
    projects.columns = vec![
        Column::new("Name", "name", 22),
        Column::new("Location", "location", 16),
        Column::new("Type", "type", 12),
        Column::new("Plots", "plots", 6),
        Column::new("Status", "status", 18),
    ];

    let mut withdrawals = ViewConfig::named("withdrawals", "Withdrawals");
    withdrawals.search_fields = strings(&["agent", "project", "amount"]);
    withdrawals.filters = vec![status_axis(Some("pending"), &["pending", "approved", "rejected"])];
    withdrawals.standard_sorts = false;
    withdrawals.unknown_sort = UnknownSort::SourceOrder;
    withdrawals.default_sort = "none".to_string();
    withdrawals.showing.numerator = ShowingNumerator::WindowEnd;
    withdrawals.counters = vec![
        count("pending", "status", "pending", Some("pending")),
        count("approved", "status", "approved", Some("pending")),
    ];
    withdrawals.columns = vec![
        Column::new("Agent", "agent", 20),
        Column::new("Project", "project", 20),
        Column::new("Amount", "amount", 12),
        Column::new("Status", "status", 10),
    ];

    vec![agents, leads, projects, withdrawals]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            interface: InterfaceConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            keybindings: KeyBindingsConfig::default(),
            views: default_views(),
        }
    }
}

impl Config {
    pub fn load(config_path_override: Option<&Path>) -> Result<Self> {
        let config_path = match config_path_override {
            Some(path) => {
                debug!("Using provided config path override: {}", path.display());
                path.to_path_buf()
            }
            None => BaseDirectories::with_prefix(APP_NAME)?
                .find_config_file(DEFAULT_CONFIG_FILENAME)
                .with_context(|| {
                    format!(
                        "Could not find default config file '{}'",
                        DEFAULT_CONFIG_FILENAME
                    )
                })?,
        };

        info!("Loading configuration from {}", config_path.display());
        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

        let config = Self::from_toml(&config_str)?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Config = toml::from_str(raw).with_context(|| "Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Every view must have a unique name and build into a valid spec.
    pub fn validate(&self) -> crate::errors::Result<()> {
        for (i, view) in self.views.iter().enumerate() {
            if self.views[..i].iter().any(|v| v.name == view.name) {
                return Err(RowdeckError::InvalidView {
                    view: view.name.clone(),
                    message: "view name is used twice".to_string(),
                });
            }
            view.to_spec()?;
        }
        Ok(())
    }

    pub fn view(&self, name: &str) -> crate::errors::Result<&ViewConfig> {
        self.views
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| RowdeckError::UnknownView(name.to_string()))
    }

    /// Resolved feed path for a view, if one exists.
    pub fn feed_path(&self, view: &ViewConfig) -> Option<PathBuf> {
        match &view.feed {
            Some(feed) => Some(PathBuf::from(shellexpand::tilde(feed).into_owned())),
            None => BaseDirectories::with_prefix(APP_NAME)
                .ok()?
                .find_data_file(format!("{}.json", view.name)),
        }
    }

    pub fn routes(&self) -> Routes {
        let mut routes = Routes::new();
        for view in &self.views {
            if let Some(path) = &view.approve_path {
                routes.insert(&view.name, ActionKind::Approve, path);
            }
            if let Some(path) = &view.delete_path {
                routes.insert(&view.name, ActionKind::Delete, path);
            }
        }
        routes
    }

    pub fn to_toml(&self) -> crate::errors::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
