//! Application state and logic.

use super::input::move_cursor;
use crossterm::event::KeyCode;
use noughts_engine::{Engine, GameMode, Position, RoundEnd, Turn, WinLine};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument};

/// Main application state.
///
/// Owns the engine and everything the screen needs that the engine does
/// not track: the cursor, the pending computer reply and the round-end
/// popup. Time is passed in by the caller so the state can be driven
/// without a terminal.
#[derive(Debug)]
pub struct App {
    engine: Engine,
    cursor: Position,
    reply_delay: Duration,
    pending_reply: Option<Instant>,
    popup: Option<RoundEnd>,
    should_quit: bool,
}

impl App {
    /// Creates a new application.
    pub fn new(mode: GameMode, reply_delay: Duration) -> Self {
        Self {
            engine: Engine::new(mode),
            cursor: Position::Center,
            reply_delay,
            pending_reply: None,
            popup: None,
            should_quit: false,
        }
    }

    /// Gets the engine.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Gets the cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// The round-end popup, while it is shown.
    pub fn popup(&self) -> Option<&RoundEnd> {
        self.popup.as_ref()
    }

    /// True once the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// True while a computer reply is scheduled.
    pub fn reply_pending(&self) -> bool {
        self.pending_reply.is_some()
    }

    /// Whether the board accepts a human move right now.
    pub fn board_enabled(&self) -> bool {
        !self.engine.state().is_over() && !self.reply_pending() && self.popup.is_none()
    }

    /// The completed line to highlight, if the round was won.
    pub fn winning_line(&self) -> Option<WinLine> {
        if !self.engine.state().is_over() {
            return None;
        }
        RoundEnd::from_outcome(self.engine.outcome()).and_then(|end| end.line())
    }

    /// Status line text.
    pub fn status_message(&self) -> String {
        if self.reply_pending() {
            format!("{} is thinking...", self.engine.computer_marker())
        } else {
            self.engine.status_message()
        }
    }

    /// Handles one key press.
    #[instrument(skip(self, now))]
    pub fn handle_key(&mut self, key: KeyCode, now: Instant) {
        if matches!(key, KeyCode::Char('q') | KeyCode::Esc) {
            info!("User quit");
            self.should_quit = true;
            return;
        }

        if self.popup.take().is_some() && !matches!(key, KeyCode::Char('n' | 'u' | 'm' | 's')) {
            debug!("Popup closed, starting new round");
            self.engine.new_round();
            return;
        }

        match key {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.place(self.cursor.to_index(), now),
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(digit) = c.to_digit(10) {
                    let index = digit as usize - 1;
                    if let Some(pos) = Position::from_index(index) {
                        self.cursor = pos;
                    }
                    self.place(index, now);
                }
            }
            KeyCode::Char('n') => {
                self.pending_reply = None;
                self.engine.new_round();
            }
            KeyCode::Char('u') => {
                self.pending_reply = None;
                self.engine.undo();
            }
            KeyCode::Char('m') => {
                self.pending_reply = None;
                let mode = self.engine.mode().toggle();
                self.engine.change_mode(mode);
            }
            KeyCode::Char('s') => {
                self.pending_reply = None;
                self.engine.reset_scores();
            }
            _ => {}
        }
    }

    /// Plays the computer's reply once its delay has passed.
    pub fn tick(&mut self, now: Instant) {
        let Some(due) = self.pending_reply else {
            return;
        };
        if now < due {
            return;
        }
        self.pending_reply = None;

        match self.engine.computer_turn() {
            Ok(turn) => self.after_turn(turn, now),
            Err(e) => error!(error = %e, "Computer reply failed"),
        }
    }

    fn place(&mut self, index: usize, now: Instant) {
        if !self.board_enabled() {
            debug!(index, "Board disabled, input ignored");
            return;
        }
        match self.engine.apply_move(index) {
            Ok(turn) => self.after_turn(turn, now),
            Err(e) => debug!(error = %e, "Move ignored"),
        }
    }

    fn after_turn(&mut self, turn: Turn, now: Instant) {
        match turn {
            Turn::Finished(end) => {
                info!(result = %end.message(), "Round finished");
                self.popup = Some(end);
            }
            Turn::Continue { .. } if self.engine.awaiting_computer() => {
                self.pending_reply = Some(now + self.reply_delay);
            }
            Turn::Continue { .. } => {}
        }
    }
}
