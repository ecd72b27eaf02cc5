//! Operations which transform an [`Automaton`](crate::Automaton) into a new one. None of them
//! modify their input, so a hypothesis can be kept around while candidate merges are evaluated.

use thiserror::Error;

use crate::StateIndex;

mod merge;
pub use merge::merge_states;

mod determinize;
pub use determinize::{fold, resolve_one_conflict};

/// Errors that can occur when transforming an automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AutomatonError {
    /// The operation refers to a state that is not present.
    #[error("state q{0} does not exist")]
    MissingState(StateIndex),
    /// A state cannot be merged with itself.
    #[error("cannot merge state q{0} with itself")]
    IdenticalStates(StateIndex),
}
