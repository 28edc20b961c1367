//! Game rules for tic-tac-toe.
//!
//! Pure functions over a board snapshot. Rules are kept apart from the
//! match engine so the search can evaluate hypothetical boards with the
//! exact same logic the engine uses for real ones.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{WIN_LINES, WinLine, check_winner};

use crate::types::{Board, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// How a board stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// `player` holds every square of `line`.
    Win {
        /// The winning player.
        player: Player,
        /// Indices of the completed line.
        line: WinLine,
    },
    /// The board is full and nobody completed a line.
    Draw,
    /// Moves remain and nobody has won.
    InProgress,
}

impl Outcome {
    /// Returns true for wins and draws.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Evaluates the board.
///
/// Lines are checked in [`WIN_LINES`] order and the first complete one is
/// reported.
#[instrument(level = "trace", skip(board))]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((player, line)) = check_winner(board) {
        Outcome::Win { player, line }
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}
