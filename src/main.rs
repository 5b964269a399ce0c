// src/main.rs

mod cli;
mod config;
mod errors;
mod feed;
mod listview;
mod server;
mod tui;

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use cli::Cli;
use config::{Config, LoggingConfig, APP_NAME};
use tui::{run_tui, tracing_layer::TuiLogCollectorLayer, UILogEntry};

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = Cli::parse();

    // Config comes first so logging.level can seed the filter; its outcome is
    // logged once the subscriber exists.
    let loaded = Config::load(cli_args.config.as_deref());
    let config = match &loaded {
        Ok(cfg) => Arc::new(cfg.clone()),
        Err(_) if cli_args.config.is_none() => Arc::new(Config::default()),
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            return Err(anyhow::anyhow!("{:#}", e));
        }
    };

    // RUST_LOG=rowdeck=trace,warn overrides both the flag and the config.
    let level = cli_args
        .log_level
        .map(|l| l.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let launch_tui = cli_args.command.is_none() && !cli_args.headless;
    let (log_file, _guard) = match file_writer(&config.logging) {
        Some((writer, guard)) => (Some(writer), Some(guard)),
        None => (None, None),
    };
    let (plain_file, json_file) = if config.logging.json {
        (None, log_file)
    } else {
        (log_file, None)
    };

    let mut log_receiver = None;
    if launch_tui {
        let (log_tx, log_rx) = mpsc::unbounded_channel::<UILogEntry>();
        log_receiver = Some(log_rx);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(TuiLogCollectorLayer::new(log_tx))
            .with(plain_file.clone().map(|w| fmt::layer().with_ansi(false).with_writer(w)))
            .with(json_file.clone().map(|w| fmt::layer().json().with_writer(w)))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(plain_file.clone().map(|w| fmt::layer().with_ansi(false).with_writer(w)))
            .with(json_file.clone().map(|w| fmt::layer().json().with_writer(w)))
            .init();
    }

    info!("Starting {}...", APP_NAME);
    if let Err(e) = &loaded {
        warn!("Proceeding with default configuration: {:#}", e);
    }
    debug!("Loaded app config: {:?}", config);

    if let Some(command) = cli_args.command {
        debug!("Handling CLI command: {:?}", command);
        if let Err(e) = cli::handle_command(command, Arc::clone(&config)).await {
            error!("{:#}", e);
            return Err(e);
        }
    } else if let Some(log_receiver) = log_receiver {
        info!("No subcommand provided, launching TUI...");
        run_tui(Arc::clone(&config), log_receiver).await?;
    } else {
        info!("Headless mode with no command; nothing to do.");
    }

    info!("{} shutting down.", APP_NAME);
    Ok(())
}

fn file_writer(logging: &LoggingConfig) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let dir = logging.log_dir_path()?;
    let rotation = if logging.rotate_daily {
        Rotation::DAILY
    } else {
        Rotation::NEVER
    };
    let appender = RollingFileAppender::new(rotation, dir, format!("{}.log", APP_NAME));
    Some(tracing_appender::non_blocking(appender))
}
