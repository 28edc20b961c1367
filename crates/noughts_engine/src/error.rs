//! Error types for the match engine.

use derive_more::{Display, Error, From};

/// A move the engine refused to apply.
///
/// Rejected moves never change match state, so callers can simply drop
/// the input that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The index is not a board square.
    #[display("Position {} is out of bounds (must be 0-8)", _0)]
    OutOfRange(#[error(not(source))] usize),

    /// The square already holds a marker.
    #[display("Square {} is already occupied", _0)]
    Occupied(#[error(not(source))] usize),

    /// The round has already been won or drawn.
    #[display("Round is already over")]
    RoundOver,
}

/// Errors returned by [`Engine`](crate::Engine) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum EngineError {
    /// A move was rejected.
    #[display("Invalid move: {}", _0)]
    InvalidMove(MoveError),

    /// The computer was asked to move outside vs-computer mode, out of turn,
    /// or after the round ended.
    #[display("Computer turn requested when it is not the computer's move")]
    #[from(ignore)]
    ComputerOutOfTurn,
}

/// A board string that could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    /// Board strings need exactly nine cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongLength(#[error(not(source))] usize),

    /// A character that is neither a marker nor an empty placeholder.
    #[display("Invalid cell '{}' (use X, O or . for empty)", _0)]
    InvalidCell(#[error(not(source))] char),
}
