//! Noughts - terminal tic-tac-toe against a perfect-play opponent.

#![warn(missing_docs)]

mod cli;
mod config;
mod hint;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use config::Settings;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::load(&cli.config)?;

    match cli.command {
        None => run_play(settings).await,
        Some(Command::Play { mode, delay_ms }) => {
            run_play(settings.with_overrides(mode, delay_ms)).await
        }
        Some(Command::Hint { board, side, json }) => run_hint(&board, side, json),
    }
}

/// Run the interactive terminal game
async fn run_play(settings: Settings) -> Result<()> {
    init_file_tracing(settings.log_file())?;
    tui::run_tui(&settings).await
}

/// Print the best move for a board
fn run_hint(board: &str, side: Option<cli::Side>, json: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let report = hint::analyse(board, side.map(Into::into))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", hint::render(&report));
    }
    Ok(())
}

/// Log to a file so output does not interfere with the TUI.
fn init_file_tracing(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(log_file = %path.display(), "Tracing initialised");
    Ok(())
}
