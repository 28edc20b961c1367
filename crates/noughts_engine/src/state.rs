//! Match state and the scoreboard carried across rounds.

use crate::rules::{Outcome, WinLine};
use crate::types::{Board, GameMode, Move, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Everything about the round currently being played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub(crate) board: Board,
    pub(crate) active_player: Player,
    pub(crate) is_over: bool,
    pub(crate) history: Vec<Move>,
    pub(crate) mode: GameMode,
}

impl MatchState {
    /// Creates a fresh round: empty board, X to move.
    pub fn new(mode: GameMode) -> Self {
        Self {
            board: Board::new(),
            active_player: Player::X,
            is_over: false,
            history: Vec::new(),
            mode,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player whose marker the next move places.
    pub fn active_player(&self) -> Player {
        self.active_player
    }

    /// Returns true once the round has been won or drawn.
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// Returns the moves of this round, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the mode this round is played in.
    pub fn mode(&self) -> GameMode {
        self.mode
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}

/// How a finished round ended.
///
/// Handed to the presentation layer so it can highlight the winning line,
/// and recorded into the [`Scoreboard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundEnd {
    /// `player` completed `line`.
    Won {
        /// The winning player.
        player: Player,
        /// Indices of the completed line.
        line: WinLine,
    },
    /// The board filled up without a winner.
    Draw,
}

impl RoundEnd {
    /// Converts a terminal outcome; `InProgress` has no round end.
    pub fn from_outcome(outcome: Outcome) -> Option<Self> {
        match outcome {
            Outcome::Win { player, line } => Some(RoundEnd::Won { player, line }),
            Outcome::Draw => Some(RoundEnd::Draw),
            Outcome::InProgress => None,
        }
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<Player> {
        match self {
            RoundEnd::Won { player, .. } => Some(*player),
            RoundEnd::Draw => None,
        }
    }

    /// Returns the winning line, if any.
    pub fn line(&self) -> Option<WinLine> {
        match self {
            RoundEnd::Won { line, .. } => Some(*line),
            RoundEnd::Draw => None,
        }
    }

    /// Result text for status lines and popups.
    pub fn message(&self) -> String {
        match self {
            RoundEnd::Won { player, .. } => format!("{} wins!", player),
            RoundEnd::Draw => "It's a draw!".to_string(),
        }
    }
}

/// Win and draw counters. They survive new rounds and mode changes and are
/// cleared only by [`Scoreboard::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    x_wins: u32,
    o_wins: u32,
    draws: u32,
}

impl Scoreboard {
    /// Creates an all-zero scoreboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rounds won by X.
    pub fn x_wins(&self) -> u32 {
        self.x_wins
    }

    /// Rounds won by O.
    pub fn o_wins(&self) -> u32 {
        self.o_wins
    }

    /// Drawn rounds.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Round-end notification: bumps the matching counter.
    #[instrument(skip(self))]
    pub fn record(&mut self, end: &RoundEnd) {
        match end {
            RoundEnd::Won { player: Player::X, .. } => self.x_wins += 1,
            RoundEnd::Won { player: Player::O, .. } => self.o_wins += 1,
            RoundEnd::Draw => self.draws += 1,
        }
        debug!(x = self.x_wins, o = self.o_wins, draws = self.draws, "Scoreboard updated");
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_each_result() {
        let mut score = Scoreboard::new();
        score.record(&RoundEnd::Won {
            player: Player::X,
            line: [0, 1, 2],
        });
        score.record(&RoundEnd::Won {
            player: Player::O,
            line: [2, 4, 6],
        });
        score.record(&RoundEnd::Draw);
        score.record(&RoundEnd::Draw);
        assert_eq!(score.x_wins(), 1);
        assert_eq!(score.o_wins(), 1);
        assert_eq!(score.draws(), 2);

        score.reset();
        assert_eq!(score, Scoreboard::new());
    }

    #[test]
    fn test_round_end_from_outcome() {
        assert_eq!(RoundEnd::from_outcome(Outcome::InProgress), None);
        let end = RoundEnd::from_outcome(Outcome::Win {
            player: Player::O,
            line: [3, 4, 5],
        })
        .unwrap();
        assert_eq!(end.winner(), Some(Player::O));
        assert_eq!(end.line(), Some([3, 4, 5]));
        assert_eq!(end.message(), "O wins!");
        assert_eq!(RoundEnd::Draw.message(), "It's a draw!");
    }
}
