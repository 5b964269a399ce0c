use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc};
use tokio::sync::mpsc;

pub mod app;
pub mod events;
pub mod theme;
pub mod tracing_layer;
pub mod ui;
pub mod widgets;

pub use app::{App, InputMode, UILogEntry};
use events::run_app_loop;

use crate::{cli, config::Config, server::MutationClient};

/// Runs the interactive browser until the user quits.
///
/// The terminal is restored even when the event loop fails; the failure is
/// logged rather than returned so the shell is never left in raw mode.
pub async fn run_tui(
    config: Arc<Config>,
    log_receiver: mpsc::UnboundedReceiver<UILogEntry>,
) -> Result<()> {
    let client: Arc<dyn MutationClient> = Arc::new(cli::mutation_client(&config)?);

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(config, client, log_receiver);
    let res = run_app_loop(&mut terminal, app).await;

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("TUI event loop failed: {:?}", err);
    }

    Ok(())
}
