// src/cli.rs

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::{Config, ViewConfig};
use crate::feed::load_feed;
use crate::listview::view::Column;
use crate::listview::{
    ActionKind, CategoryChoice, ListViewController, Record, RecordId, Region, SnapshotTarget,
};
use crate::server::{perform_action, CsrfTokenProvider, HttpMutationClient, TracingNotifier};

/// Rowdeck: terminal console for admin list views
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional path to the configuration file
    #[clap(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not launch the TUI when no subcommand is given
    #[clap(long)]
    pub headless: bool,

    /// Set log level (overrides logging.level; RUST_LOG overrides both)
    #[clap(long, value_name = "LEVEL", value_enum)]
    pub log_level: Option<LogLevelCli>,

    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the configured views
    Views,
    /// Print one page of a view
    Show {
        view: String,
        /// Free-text search term
        #[clap(long)]
        search: Option<String>,
        /// Category filter, e.g. `--filter status=pending` (repeatable)
        #[clap(long, value_name = "AXIS=VALUE")]
        filter: Vec<String>,
        /// Sort key, e.g. `newest` or `budget_high`
        #[clap(long)]
        sort: Option<String>,
        #[clap(long, default_value_t = 1)]
        page: usize,
        /// Page size; zero or garbage falls back to the view default
        #[clap(long)]
        page_size: Option<String>,
    },
    /// Approve a record
    Approve { view: String, id: String },
    /// Delete a record
    Delete {
        view: String,
        id: String,
        /// Skip the confirmation prompt
        #[clap(long, short)]
        yes: bool,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevelCli {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevelCli {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevelCli::Trace => "trace",
            LogLevelCli::Debug => "debug",
            LogLevelCli::Info => "info",
            LogLevelCli::Warn => "warn",
            LogLevelCli::Error => "error",
        }
    }
}

pub async fn handle_command(command: Commands, config: Arc<Config>) -> Result<()> {
    match command {
        Commands::Views => list_views(&config),
        Commands::Show {
            view,
            search,
            filter,
            sort,
            page,
            page_size,
        } => {
            let query = ShowQuery {
                search,
                filters: filter,
                sort,
                page,
                page_size,
            };
            show_view(&config, &view, &query)
        }
        Commands::Approve { view, id } => run_action(&config, &view, &id, ActionKind::Approve, true).await,
        Commands::Delete { view, id, yes } => {
            let confirmed = yes || confirm(&format!("Delete {} from {}? [y/N] ", id, view))?;
            run_action(&config, &view, &id, ActionKind::Delete, confirmed).await
        }
        Commands::Config => {
            println!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// Loads a view's feed and mounts a controller over it. `None` when the view
/// has no feed or the feed is empty.
pub fn mount_view(config: &Config, view: &ViewConfig) -> Result<Option<ListViewController<SnapshotTarget>>> {
    let spec = view.to_spec()?;
    let source = match config.feed_path(view) {
        Some(path) => Some(
            load_feed(&path, &view.id_field)
                .with_context(|| format!("Failed to load feed for view '{}' from {}", view.name, path.display()))?,
        ),
        None => {
            warn!("View '{}' has no feed file", view.name);
            None
        }
    };
    Ok(ListViewController::mount(spec, source, SnapshotTarget::new()))
}

pub fn mutation_client(config: &Config) -> Result<HttpMutationClient> {
    let csrf = Arc::new(CsrfTokenProvider::from_env_or(
        &config.server.cookie_name,
        config.server.cookie.clone(),
    ));
    let client = HttpMutationClient::new(
        &config.server.base_url,
        config.server.timeout(),
        config.routes(),
        csrf,
    )?;
    Ok(client)
}

fn list_views(config: &Config) -> Result<()> {
    for view in &config.views {
        let feed = config
            .feed_path(view)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        let mut actions = Vec::new();
        if view.approve_path.is_some() {
            actions.push("approve");
        }
        if view.delete_path.is_some() {
            actions.push("delete");
        }
        println!(
            "{:<14} {:<14} {:<10} {}",
            view.name,
            view.title(),
            if actions.is_empty() { "-".to_string() } else { actions.join(",") },
            feed
        );
    }
    Ok(())
}

#[derive(Debug, Default)]
struct ShowQuery {
    search: Option<String>,
    filters: Vec<String>,
    sort: Option<String>,
    page: usize,
    page_size: Option<String>,
}

fn show_view(config: &Config, name: &str, query: &ShowQuery) -> Result<()> {
    let view = config.view(name)?;
    let Some(mut controller) = mount_view(config, view)? else {
        println!("{}: no records", view.title());
        return Ok(());
    };
    for line in render_query(&mut controller, query)? {
        println!("{}", line);
    }
    Ok(())
}

fn render_query(controller: &mut ListViewController<SnapshotTarget>, query: &ShowQuery) -> Result<Vec<String>> {
    if let Some(term) = &query.search {
        controller.set_search(term);
    }
    for raw in &query.filters {
        let (axis, choice) = parse_filter_arg(raw)?;
        controller.set_filter(&axis, choice)?;
    }
    if let Some(key) = &query.sort {
        controller.set_sort(key);
    }
    if let Some(size) = &query.page_size {
        controller.set_page_size_raw(size);
    }
    if query.page > 1 && !controller.go_to_page(query.page) {
        warn!(
            "Page {} is out of range (1..={}); showing page 1",
            query.page,
            controller.page_count()
        );
    }
    Ok(page_lines(controller))
}

fn page_lines(controller: &ListViewController<SnapshotTarget>) -> Vec<String> {
    let columns = columns_for(controller);
    let target = controller.target();
    let mut lines = Vec::new();

    lines.push(
        columns
            .iter()
            .map(|c| fit_cell(&c.title, c.width as usize))
            .collect::<Vec<_>>()
            .join(" "),
    );
    for record in controller.visible_records() {
        lines.push(row_line(&columns, record));
    }
    if target.is_visible(&Region::EmptyState) {
        lines.push("No matching records".to_string());
    }

    lines.push(String::new());
    lines.push(format!(
        "Showing {} of {} ({} matching)",
        target.text(&Region::ShowingCount).unwrap_or("0"),
        target.text(&Region::TotalCount).unwrap_or("0"),
        target.text(&Region::FilteredCount).unwrap_or("0"),
    ));
    let counters: Vec<String> = controller
        .spec()
        .counters
        .iter()
        .map(|c| {
            let region = Region::Counter(c.name.clone());
            format!("{}: {}", c.name, target.text(&region).unwrap_or("0"))
        })
        .collect();
    if !counters.is_empty() {
        lines.push(counters.join("  "));
    }
    let pages: Vec<String> = target
        .children(&Region::Pagination)
        .iter()
        .map(|control| {
            let label = control.label();
            if control.active {
                format!("[{}]", label)
            } else if control.disabled {
                format!("({})", label)
            } else {
                label
            }
        })
        .collect();
    if !pages.is_empty() {
        lines.push(pages.join(" "));
    }
    lines
}

/// Configured columns, or the id plus the search fields when none are set.
pub fn columns_for<R: crate::listview::RenderTarget>(controller: &ListViewController<R>) -> Vec<Column> {
    let spec = controller.spec();
    if !spec.columns.is_empty() {
        return spec.columns.clone();
    }
    let mut columns = vec![Column::new("Id", "", 8)];
    columns.extend(spec.search_fields.iter().map(|f| Column::new(f, f, 16)));
    columns
}

/// Cell text for a column. The empty field name stands for the record id.
pub fn cell_text(record: &Record, column: &Column) -> String {
    if column.field.is_empty() {
        record.id().to_string()
    } else {
        record.text(&column.field).into_owned()
    }
}

fn row_line(columns: &[Column], record: &Record) -> String {
    columns
        .iter()
        .map(|c| fit_cell(&cell_text(record, c), c.width as usize))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pads or truncates `text` to exactly `width` terminal columns.
pub fn fit_cell(text: &str, width: usize) -> String {
    let text = text.replace(['\n', '\r', '\t'], " ");
    if text.width() <= width {
        let pad = width - text.width();
        return format!("{}{}", text, " ".repeat(pad));
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

pub fn parse_filter_arg(raw: &str) -> Result<(String, CategoryChoice)> {
    let Some((axis, value)) = raw.split_once('=') else {
        bail!("Filter '{}' must look like AXIS=VALUE", raw);
    };
    let axis = axis.trim();
    if axis.is_empty() {
        bail!("Filter '{}' names no axis", raw);
    }
    Ok((axis.to_string(), CategoryChoice::parse(value)))
}

fn confirm(prompt: &str) -> Result<bool> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{}", prompt)?;
    stdout.flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

async fn run_action(config: &Config, view_name: &str, id: &str, kind: ActionKind, confirmed: bool) -> Result<()> {
    let view = config.view(view_name)?;
    let client = mutation_client(config)?;
    if !client.routes().supports(&view.name, kind) {
        bail!("View '{}' has no {} endpoint", view.name, kind);
    }
    let Some(mut controller) = mount_view(config, view)? else {
        bail!("View '{}' has no records", view.name);
    };
    let id = RecordId::from(id);
    match perform_action(&mut controller, &client, &TracingNotifier, &id, kind, confirmed).await? {
        None => {
            info!("Cancelled {} of {}", kind, id);
            Ok(())
        }
        Some(notice) if notice.is_error() => bail!("{} of {} failed: {}", kind, id, notice.message),
        Some(_) => Ok(()),
    }
}
