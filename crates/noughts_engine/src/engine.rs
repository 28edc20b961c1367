//! Match engine: turn sequencing, undo and the computer opponent.
//!
//! The engine is a plain owned value. Callers hold it and pass it around
//! explicitly; there is no global match. Timing is left to the caller: in
//! vs-computer mode the caller decides when to invoke
//! [`Engine::computer_turn`] after a human move.

use crate::error::{EngineError, MoveError};
use crate::invariants::assert_invariants;
use crate::rules::{Outcome, evaluate};
use crate::search::best_move;
use crate::state::{MatchState, RoundEnd, Scoreboard};
use crate::types::{BOARD_SIZE, GameMode, Move, Player, Square};
use tracing::{debug, error, info, instrument};

/// The marker the computer plays in vs-computer mode.
pub const COMPUTER: Player = Player::O;

/// What happened after a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// The round goes on with `next` to move.
    Continue {
        /// The player who moves next.
        next: Player,
    },
    /// The move ended the round.
    Finished(RoundEnd),
}

/// Owns the current round and the scoreboard.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    state: MatchState,
    scoreboard: Scoreboard,
}

impl Engine {
    /// Creates an engine with a fresh round in `mode` and a zeroed scoreboard.
    #[instrument]
    pub fn new(mode: GameMode) -> Self {
        Self {
            state: MatchState::new(mode),
            scoreboard: Scoreboard::new(),
        }
    }

    /// Returns the current round.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Returns the scoreboard.
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Returns the current mode.
    pub fn mode(&self) -> GameMode {
        self.state.mode
    }

    /// Returns the marker the computer plays.
    pub fn computer_marker(&self) -> Player {
        COMPUTER
    }

    /// Evaluates the current board.
    pub fn outcome(&self) -> Outcome {
        evaluate(&self.state.board)
    }

    /// Starts a fresh round in `mode`. The scoreboard is kept.
    #[instrument(skip(self))]
    pub fn start_round(&mut self, mode: GameMode) {
        self.state = MatchState::new(mode);
        debug!(%mode, "Round started");
    }

    /// Starts a fresh round in the current mode.
    pub fn new_round(&mut self) {
        self.start_round(self.state.mode);
    }

    /// Switches mode. Always starts a fresh round.
    #[instrument(skip(self))]
    pub fn change_mode(&mut self, mode: GameMode) {
        info!(from = %self.state.mode, to = %mode, "Changing mode");
        self.start_round(mode);
    }

    /// Zeroes the scoreboard and starts a fresh round in the current mode.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) {
        self.scoreboard.reset();
        self.new_round();
        info!("Scores reset");
    }

    /// Places the active player's marker at `index`.
    ///
    /// # Errors
    ///
    /// Rejects the move if the round is over, `index` is not 0-8, or the
    /// square is taken. A rejected move leaves the engine untouched.
    #[instrument(skip(self), fields(player = %self.state.active_player))]
    pub fn apply_move(&mut self, index: usize) -> Result<Turn, MoveError> {
        if self.state.is_over {
            return Err(MoveError::RoundOver);
        }
        if index >= BOARD_SIZE {
            return Err(MoveError::OutOfRange(index));
        }
        if !self.state.board.is_empty(index) {
            return Err(MoveError::Occupied(index));
        }

        let player = self.state.active_player;
        self.state.board.set(index, Square::Occupied(player))?;
        self.state.history.push(Move::new(index, player));

        let turn = match RoundEnd::from_outcome(evaluate(&self.state.board)) {
            Some(end) => {
                self.state.is_over = true;
                self.scoreboard.record(&end);
                info!(result = %end.message(), moves = self.state.history.len(), "Round over");
                Turn::Finished(end)
            }
            None => {
                self.state.active_player = player.opponent();
                Turn::Continue {
                    next: self.state.active_player,
                }
            }
        };

        assert_invariants(&self.state);
        Ok(turn)
    }

    /// True when [`computer_turn`](Self::computer_turn) may be called:
    /// vs-computer mode, round not over, and the computer to move.
    pub fn awaiting_computer(&self) -> bool {
        self.state.mode == GameMode::VsComputer
            && !self.state.is_over
            && self.state.active_player == COMPUTER
    }

    /// Lets the computer pick and play its move.
    ///
    /// Calling this when [`awaiting_computer`](Self::awaiting_computer) is
    /// false is a sequencing bug in the caller: debug builds panic, release
    /// builds log it and return [`EngineError::ComputerOutOfTurn`].
    #[instrument(skip(self))]
    pub fn computer_turn(&mut self) -> Result<Turn, EngineError> {
        if !self.awaiting_computer() {
            error!(
                mode = %self.state.mode,
                active = %self.state.active_player,
                is_over = self.state.is_over,
                "Computer turn requested out of sequence"
            );
            debug_assert!(false, "computer turn requested out of sequence");
            return Err(EngineError::ComputerOutOfTurn);
        }

        let index = best_move(&self.state.board, COMPUTER).ok_or_else(|| {
            error!("No move available on an open board");
            EngineError::ComputerOutOfTurn
        })?;
        debug!(index, "Computer chose square");
        Ok(self.apply_move(index)?)
    }

    /// Takes back the last move, or the last human/computer pair in
    /// vs-computer mode. Returns how many moves were removed.
    ///
    /// After any undo the round is open again and X is to move, even when
    /// the remaining history would make it O's turn.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> usize {
        let steps = match self.state.mode {
            GameMode::Local => 1,
            GameMode::VsComputer => 2,
        };

        let mut removed = 0;
        while removed < steps {
            let Some(last) = self.state.history.pop() else {
                break;
            };
            self.state.board.set(last.index, Square::Empty).ok();
            removed += 1;
        }
        if removed == 0 {
            return 0;
        }

        self.state.is_over = false;
        self.state.active_player = Player::X;
        debug!(removed, remaining = self.state.history.len(), "Undo");
        assert_invariants(&self.state);
        removed
    }

    /// Status line: whose turn it is, or the round result.
    pub fn status_message(&self) -> String {
        match RoundEnd::from_outcome(self.outcome()) {
            Some(end) if self.state.is_over => end.message(),
            _ => format!("{} to move", self.state.active_player),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(engine: &mut Engine, moves: &[usize]) -> Turn {
        let mut last = Turn::Continue { next: Player::X };
        for &index in moves {
            last = engine.apply_move(index).unwrap();
        }
        last
    }

    #[test]
    fn test_new_engine_is_fresh() {
        let engine = Engine::new(GameMode::Local);
        let state = engine.state();
        assert_eq!(*state.board(), crate::types::Board::new());
        assert_eq!(state.active_player(), Player::X);
        assert!(!state.is_over());
        assert!(state.history().is_empty());
        assert_eq!(engine.status_message(), "X to move");
    }

    #[test]
    fn test_players_alternate() {
        let mut engine = Engine::new(GameMode::Local);
        for (n, index) in [4, 0, 8, 2, 6].into_iter().enumerate() {
            let expected = if n % 2 == 0 { Player::X } else { Player::O };
            assert_eq!(engine.state().active_player(), expected);
            engine.apply_move(index).unwrap();
        }
    }

    #[test]
    fn test_top_row_win_scores_for_x() {
        let mut engine = Engine::new(GameMode::Local);
        play(&mut engine, &[0, 3, 1, 4]);
        assert_eq!(
            engine.apply_move(2),
            Ok(Turn::Finished(RoundEnd::Won {
                player: Player::X,
                line: [0, 1, 2]
            }))
        );
        assert!(engine.state().is_over());
        assert_eq!(engine.scoreboard().x_wins(), 1);
        assert_eq!(engine.status_message(), "X wins!");
        // Winner keeps the active slot; no swap after a terminal move.
        assert_eq!(engine.state().active_player(), Player::X);
    }

    #[test]
    fn test_draw_recorded() {
        let mut engine = Engine::new(GameMode::Local);
        // X O X / X O O / O X X
        let turn = play(&mut engine, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(turn, Turn::Finished(RoundEnd::Draw));
        assert_eq!(engine.scoreboard().draws(), 1);
        assert_eq!(engine.status_message(), "It's a draw!");
    }

    #[test]
    fn test_rejected_moves_leave_state_unchanged() {
        let mut engine = Engine::new(GameMode::Local);
        engine.apply_move(4).unwrap();
        let before = engine.state().clone();

        assert_eq!(engine.apply_move(4), Err(MoveError::Occupied(4)));
        assert_eq!(engine.apply_move(9), Err(MoveError::OutOfRange(9)));
        assert_eq!(engine.state(), &before);

        play(&mut engine, &[0, 2, 1, 6]);
        let before = engine.state().clone();
        let score = *engine.scoreboard();
        assert_eq!(engine.apply_move(8), Err(MoveError::RoundOver));
        assert_eq!(engine.state(), &before);
        assert_eq!(engine.scoreboard(), &score);
    }

    #[test]
    fn test_undo_local_pops_one_and_hands_turn_to_x() {
        let mut engine = Engine::new(GameMode::Local);
        play(&mut engine, &[0, 4]);
        assert_eq!(engine.undo(), 1);
        assert_eq!(engine.state().history(), &[Move::new(0, Player::X)]);
        assert!(engine.state().board().is_empty(4));
        assert_eq!(engine.state().active_player(), Player::X);
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut engine = Engine::new(GameMode::VsComputer);
        let before = engine.state().clone();
        assert_eq!(engine.undo(), 0);
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_undo_reopens_finished_round() {
        let mut engine = Engine::new(GameMode::Local);
        play(&mut engine, &[0, 3, 1, 4, 2]);
        assert!(engine.state().is_over());
        assert_eq!(engine.undo(), 1);
        assert!(!engine.state().is_over());
        assert_eq!(engine.apply_move(8), Ok(Turn::Continue { next: Player::O }));
        // The finished round stays on the scoreboard.
        assert_eq!(engine.scoreboard().x_wins(), 1);
    }

    #[test]
    fn test_undo_vs_computer_pops_pair() {
        let mut engine = Engine::new(GameMode::VsComputer);
        engine.apply_move(0).unwrap();
        assert!(engine.awaiting_computer());
        engine.computer_turn().unwrap();
        let free = engine.state().board().empties().next().unwrap();
        engine.apply_move(free).unwrap();
        assert_eq!(engine.state().history().len(), 3);

        assert_eq!(engine.undo(), 2);
        assert_eq!(engine.state().history().len(), 1);
        assert_eq!(engine.undo(), 1);
        assert!(engine.state().history().is_empty());
        assert_eq!(engine.state().board().occupied(), 0);
    }

    #[test]
    fn test_computer_replies_to_corner_with_center() {
        let mut engine = Engine::new(GameMode::VsComputer);
        assert!(!engine.awaiting_computer());
        assert_eq!(engine.apply_move(0), Ok(Turn::Continue { next: COMPUTER }));
        assert!(engine.awaiting_computer());
        assert_eq!(engine.computer_turn(), Ok(Turn::Continue { next: Player::X }));
        assert_eq!(engine.state().history()[1], Move::new(4, Player::O));
        assert!(!engine.awaiting_computer());
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "computer turn requested"))]
    fn test_computer_turn_in_local_mode_is_contract_violation() {
        let mut engine = Engine::new(GameMode::Local);
        engine.apply_move(0).unwrap();
        assert_eq!(engine.computer_turn(), Err(EngineError::ComputerOutOfTurn));
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "computer turn requested"))]
    fn test_computer_turn_out_of_turn_is_contract_violation() {
        let mut engine = Engine::new(GameMode::VsComputer);
        assert_eq!(engine.computer_turn(), Err(EngineError::ComputerOutOfTurn));
    }

    #[test]
    fn test_change_mode_starts_fresh_round_and_keeps_scores() {
        let mut engine = Engine::new(GameMode::Local);
        play(&mut engine, &[0, 3, 1, 4, 2]);
        engine.change_mode(GameMode::VsComputer);
        assert_eq!(engine.mode(), GameMode::VsComputer);
        assert!(engine.state().history().is_empty());
        assert!(!engine.state().is_over());
        assert_eq!(engine.scoreboard().x_wins(), 1);
    }

    #[test]
    fn test_reset_scores_clears_counters_and_round() {
        let mut engine = Engine::new(GameMode::Local);
        play(&mut engine, &[0, 3, 1, 4, 2]);
        engine.reset_scores();
        assert_eq!(engine.scoreboard(), &Scoreboard::new());
        assert!(engine.state().history().is_empty());
        assert_eq!(engine.mode(), GameMode::Local);
    }
}
