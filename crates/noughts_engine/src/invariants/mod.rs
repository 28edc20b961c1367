//! Checkable properties of a match.
//!
//! Invariants are logical properties that must hold after every engine
//! transition. The engine asserts them in debug builds; tests can check
//! them directly.

mod history_consistent;
mod terminal_flag;

pub use history_consistent::HistoryConsistentInvariant;
pub use terminal_flag::TerminalFlagInvariant;

use crate::state::MatchState;
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of [`Invariant`]s.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// All match invariants as a composable set.
pub type MatchInvariants = (HistoryConsistentInvariant, TerminalFlagInvariant);

/// Asserts that all match invariants hold (panics on violation in debug builds).
pub fn assert_invariants(state: &MatchState) {
    if let Err(violations) = MatchInvariants::check_all(state) {
        for violation in &violations {
            warn!(%violation, "Match invariant violated");
        }
        debug_assert!(false, "Match invariants violated: {:?}", violations);
    }
}
