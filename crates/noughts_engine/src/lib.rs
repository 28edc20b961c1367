//! Tic-tac-toe engine with a perfect-play opponent.
//!
//! # Architecture
//!
//! - **Rules**: pure evaluation of a board (win with line, draw, in progress)
//! - **Engine**: owns the round and scoreboard; moves, undo, mode changes
//! - **Search**: exhaustive minimax that picks the computer's move
//! - **Invariants**: properties of a match checked after every transition
//!
//! # Example
//!
//! ```
//! use noughts_engine::{Engine, GameMode, Turn};
//!
//! let mut engine = Engine::new(GameMode::VsComputer);
//! engine.apply_move(0).unwrap();
//! assert!(engine.awaiting_computer());
//! let turn = engine.computer_turn().unwrap();
//! assert!(matches!(turn, Turn::Continue { .. }));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod error;
mod state;
mod types;

pub mod invariants;
pub mod rules;
pub mod search;

pub use engine::{COMPUTER, Engine, Turn};
pub use error::{BoardParseError, EngineError, MoveError};
pub use rules::{Outcome, WIN_LINES, WinLine, evaluate};
pub use search::{ScoredMove, best_move, score_moves};
pub use state::{MatchState, RoundEnd, Scoreboard};
pub use types::{BOARD_SIZE, Board, GameMode, Move, Player, Position, Square};
