//! Terminal flag invariant: `is_over` agrees with the rules.

use super::Invariant;
use crate::rules::evaluate;
use crate::state::MatchState;

/// Invariant: the round is over exactly when the board is won or drawn.
pub struct TerminalFlagInvariant;

impl Invariant<MatchState> for TerminalFlagInvariant {
    fn holds(state: &MatchState) -> bool {
        state.is_over() == evaluate(state.board()).is_terminal()
    }

    fn description() -> &'static str {
        "Round is over iff the board is won or drawn"
    }
}
