//! Perfect-play move selection.
//!
//! Exhaustive minimax over every continuation of the current board. A 3x3
//! board has at most nine plies left, so the whole tree is searched without
//! depth limits. Each branch works on its own copy of the board; the caller's
//! board is only ever borrowed immutably.

use crate::rules::{Outcome, evaluate};
use crate::types::{Board, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Score of a position the computer has won.
pub const WIN_SCORE: i32 = 10;

/// Score of a drawn position.
pub const DRAW_SCORE: i32 = 0;

/// A candidate square together with its minimax value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMove {
    /// Board index of the candidate.
    pub index: usize,
    /// +10 forced win, 0 draw with best play, -10 forced loss.
    pub score: i32,
}

/// Returns the optimal square for `computer` to play.
///
/// Candidates are scored by [`score_moves`]; the highest score wins and ties
/// go to the lowest index. Returns `None` when the board is already decided.
#[instrument(skip(board), fields(cells = %board.display()))]
pub fn best_move(board: &Board, computer: Player) -> Option<usize> {
    let best = score_moves(board, computer)
        .into_iter()
        .fold(None::<ScoredMove>, |best, candidate| match best {
            Some(best) if best.score >= candidate.score => Some(best),
            _ => Some(candidate),
        })?;
    debug!(index = best.index, score = best.score, "Selected move");
    Some(best.index)
}

/// Scores every empty square for `computer`, in ascending index order.
///
/// Each score assumes both sides play perfectly after the candidate move.
/// Wins are not discounted by depth: a win in one ply scores the same as a
/// win in five. A decided board has no candidates.
pub fn score_moves(board: &Board, computer: Player) -> Vec<ScoredMove> {
    if evaluate(board).is_terminal() {
        return Vec::new();
    }
    board
        .empties()
        .map(|index| ScoredMove {
            index,
            score: minimax(&board.with(index, computer), computer, false),
        })
        .collect()
}

fn minimax(board: &Board, computer: Player, maximizing: bool) -> i32 {
    match evaluate(board) {
        Outcome::Win { player, .. } if player == computer => WIN_SCORE,
        Outcome::Win { .. } => -WIN_SCORE,
        Outcome::Draw => DRAW_SCORE,
        Outcome::InProgress => {
            let mover = if maximizing {
                computer
            } else {
                computer.opponent()
            };
            let scores = board
                .empties()
                .map(|index| minimax(&board.with(index, mover), computer, !maximizing));
            // InProgress guarantees at least one empty square.
            let best = if maximizing { scores.max() } else { scores.min() };
            best.unwrap_or(DRAW_SCORE)
        }
    }
}
