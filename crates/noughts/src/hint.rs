//! Headless move suggestion for a single board.

use derive_more::{Display, Error, From};
use noughts_engine::{
    Board, BoardParseError, Player, Position, RoundEnd, ScoredMove, best_move, evaluate,
    score_moves,
};
use serde::Serialize;
use tracing::{info, instrument};

/// Why a board could not be analysed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum HintError {
    /// The board string was malformed.
    #[display("{}", _0)]
    Parse(BoardParseError),

    /// Marker counts cannot arise from X-first alternating play.
    #[display("Not a reachable position: {} X and {} O", x, o)]
    #[from(ignore)]
    Unreachable {
        /// Number of X markers.
        x: usize,
        /// Number of O markers.
        o: usize,
    },

    /// The board is already won or drawn.
    #[display("Board is already decided: {}", _0)]
    #[from(ignore)]
    Decided(#[error(not(source))] String),
}

/// Analysis of one board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HintReport {
    /// The analysed board.
    pub board: Board,
    /// Side the move is for.
    pub player: Player,
    /// Recommended index.
    pub best: usize,
    /// Every candidate with its minimax score, ascending by index.
    pub candidates: Vec<ScoredMove>,
}

/// Side to move under X-first alternation.
fn side_to_move(board: &Board) -> Result<Player, HintError> {
    let x = board.count(Player::X);
    let o = board.count(Player::O);
    match x.checked_sub(o) {
        Some(0) => Ok(Player::X),
        Some(1) => Ok(Player::O),
        _ => Err(HintError::Unreachable { x, o }),
    }
}

/// Parses `input` and finds the best move for `side` (or the side to move).
#[instrument]
pub fn analyse(input: &str, side: Option<Player>) -> Result<HintReport, HintError> {
    let board: Board = input.parse()?;
    let to_move = side_to_move(&board)?;
    let player = side.unwrap_or(to_move);

    if let Some(end) = RoundEnd::from_outcome(evaluate(&board)) {
        return Err(HintError::Decided(end.message()));
    }

    let candidates = score_moves(&board, player);
    let best = best_move(&board, player)
        .ok_or_else(|| HintError::Decided("no empty squares".to_string()))?;
    info!(%player, best, "Hint computed");

    Ok(HintReport {
        board,
        player,
        best,
        candidates,
    })
}

/// Renders a report for the terminal.
pub fn render(report: &HintReport) -> String {
    let mut out = report.board.display();
    out.push_str("\n\n");
    out.push_str(&format!(
        "Best move for {}: {} ({})\n",
        report.player,
        report.best + 1,
        label(report.best)
    ));
    for candidate in &report.candidates {
        let verdict = match candidate.score.signum() {
            1 => "win",
            -1 => "loss",
            _ => "draw",
        };
        out.push_str(&format!(
            "  {} {:<13} {:>3}  {}\n",
            candidate.index + 1,
            label(candidate.index),
            candidate.score,
            verdict
        ));
    }
    out
}

fn label(index: usize) -> &'static str {
    Position::from_index(index).map_or("?", |pos| pos.label())
}
