//! Command-line interface for noughts.

use clap::{Parser, Subcommand, ValueEnum};
use noughts_engine::{GameMode, Player};
use std::path::PathBuf;

/// Noughts - tic-tac-toe against a computer that never loses
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe with a perfect-play opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the settings file (missing file means defaults)
    #[arg(short, long, default_value = "noughts.toml", global = true)]
    pub config: PathBuf,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Game mode: `local` or `computer` (overrides the settings file)
        #[arg(short, long)]
        mode: Option<GameMode>,

        /// Pause before the computer replies, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Print the best move for a board and exit
    Hint {
        /// Nine cells in row-major order, e.g. `XX.OO....` (`.`, `_`, `-` are empty)
        board: String,

        /// Side to find a move for (default: whoever is to move)
        #[arg(long = "as", value_enum)]
        side: Option<Side>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Marker choice on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Player X
    X,
    /// Player O
    O,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Player::X,
            Side::O => Player::O,
        }
    }
}
