//! Terminal UI for noughts.

mod app;
mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tracing::{error, info, instrument};

use crate::config::Settings;
pub use app::App;

/// How long to wait for a key before re-checking the pending reply.
const INPUT_POLL: Duration = Duration::from_millis(25);

/// Runs the interactive game until the user quits.
#[instrument(skip_all, fields(mode = %settings.mode()))]
pub async fn run_tui(settings: &Settings) -> Result<()> {
    info!("Starting noughts TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let app = App::new(*settings.mode(), settings.computer_delay());
    let res = run_app(&mut terminal, app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

async fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(INPUT_POLL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key.code, Instant::now());
        }

        if app.should_quit() {
            let score = app.engine().scoreboard();
            info!(
                x_wins = score.x_wins(),
                o_wins = score.o_wins(),
                draws = score.draws(),
                "Session finished"
            );
            return Ok(());
        }

        app.tick(Instant::now());
        tokio::task::yield_now().await;
    }
}
