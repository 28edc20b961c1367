//! Core domain types for tic-tac-toe.

use crate::error::{BoardParseError, MoveError};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Number of squares on the board.
pub const BOARD_SIZE: usize = 9;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second, the computer in vs-computer mode).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; BOARD_SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; BOARD_SIZE],
        }
    }

    /// Creates a board from squares in row-major order.
    pub fn from_squares(squares: [Square; BOARD_SIZE]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given position (0-8).
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: usize, square: Square) -> Result<(), MoveError> {
        let slot = self.squares.get_mut(pos).ok_or(MoveError::OutOfRange(pos))?;
        *slot = square;
        Ok(())
    }

    /// Returns a copy of this board with `player` placed at `pos`.
    ///
    /// Out-of-range positions return the board unchanged.
    pub fn with(mut self, pos: usize, player: Player) -> Self {
        if let Some(slot) = self.squares.get_mut(pos) {
            *slot = Square::Occupied(player);
        }
        self
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Indices of all empty squares in ascending order.
    pub fn empties(&self) -> impl Iterator<Item = usize> + '_ {
        (0..BOARD_SIZE).filter(|&pos| self.is_empty(pos))
    }

    /// Number of occupied squares.
    pub fn occupied(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Number of squares held by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; BOARD_SIZE] {
        &self.squares
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(Player::X) => "X".to_string(),
                    Square::Occupied(Player::O) => "O".to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses nine cells in row-major order.
    ///
    /// `X`/`O` (any case) are markers; `.`, `_`, `-` and `1`-`9` are empty.
    /// Whitespace and `|` separators are ignored.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .collect();
        if cells.len() != BOARD_SIZE {
            return Err(BoardParseError::WrongLength(cells.len()));
        }

        let mut board = Board::new();
        for (pos, c) in cells.into_iter().enumerate() {
            let square = match c {
                'x' | 'X' => Square::Occupied(Player::X),
                'o' | 'O' => Square::Occupied(Player::O),
                '.' | '_' | '-' | '1'..='9' => Square::Empty,
                other => return Err(BoardParseError::InvalidCell(other)),
            };
            board.squares[pos] = square;
        }
        Ok(board)
    }
}

/// A named square on the board, used for cursor movement and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Top-left (position 0)
    TopLeft,
    /// Top-center (position 1)
    TopCenter,
    /// Top-right (position 2)
    TopRight,
    /// Middle-left (position 3)
    MiddleLeft,
    /// Center (position 4)
    Center,
    /// Middle-right (position 5)
    MiddleRight,
    /// Bottom-left (position 6)
    BottomLeft,
    /// Bottom-center (position 7)
    BottomCenter,
    /// Bottom-right (position 8)
    BottomRight,
}

impl Position {
    /// All 9 positions.
    pub const ALL: [Position; BOARD_SIZE] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Get label for this position (for display).
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Converts position to board index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates position from board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl From<Position> for usize {
    fn from(pos: Position) -> Self {
        pos.to_index()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A placed marker, kept for undo bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    /// Board index the marker was placed on.
    pub index: usize,
    /// The player who placed it.
    pub player: Player,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match Position::from_index(self.index) {
            Some(pos) => write!(f, "{} -> {}", self.player, pos.label()),
            None => write!(f, "{} -> {}", self.player, self.index),
        }
    }
}

/// Who plays O.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Two humans share the keyboard.
    #[strum(to_string = "local")]
    Local,
    /// A human plays X against the computer as O.
    #[default]
    #[strum(to_string = "computer", serialize = "cpu")]
    #[serde(rename = "computer", alias = "cpu")]
    VsComputer,
}

impl GameMode {
    /// Returns display name.
    pub fn name(self) -> &'static str {
        match self {
            GameMode::Local => "Two players",
            GameMode::VsComputer => "Vs computer",
        }
    }

    /// Switches to the other mode.
    pub fn toggle(self) -> Self {
        match self {
            GameMode::Local => GameMode::VsComputer,
            GameMode::VsComputer => GameMode::Local,
        }
    }
}
