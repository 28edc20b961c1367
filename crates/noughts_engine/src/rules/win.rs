//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Player, Square};
use tracing::instrument;

/// Three board indices forming a row, column or diagonal.
pub type WinLine = [usize; 3];

/// Every winning line, in the order they are checked.
pub const WIN_LINES: [WinLine; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks if there is a winner on the board.
///
/// Returns the player holding the first complete line together with that
/// line, or `None` if no line is complete.
#[instrument(level = "trace", skip(board))]
pub fn check_winner(board: &Board) -> Option<(Player, WinLine)> {
    let squares = board.squares();
    WIN_LINES.into_iter().find_map(|line @ [a, b, c]| match squares[a] {
        Square::Occupied(player) if squares[b] == squares[a] && squares[c] == squares[a] => {
            Some((player, line))
        }
        _ => None,
    })
}
