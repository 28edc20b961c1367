//! History consistency invariant: history matches occupied squares.

use super::Invariant;
use crate::state::MatchState;
use crate::types::Square;

/// Invariant: every occupied square has exactly one history entry.
///
/// History length equals the number of occupied squares, and each recorded
/// move's square still holds that move's marker.
pub struct HistoryConsistentInvariant;

impl Invariant<MatchState> for HistoryConsistentInvariant {
    fn holds(state: &MatchState) -> bool {
        let board = state.board();
        state.history().len() == board.occupied()
            && state
                .history()
                .iter()
                .all(|mv| board.get(mv.index) == Some(Square::Occupied(mv.player)))
    }

    fn description() -> &'static str {
        "History matches occupied squares"
    }
}
