use crate::Show;

/// Type used for identifying states. Identifiers are unique within one [`Automaton`](crate::Automaton)
/// but need not be contiguous, removing a state never renumbers the remaining ones.
pub type StateIndex = usize;

/// A single state of an [`Automaton`](crate::Automaton), consisting of its identifier and
/// the two flags which determine whether it is the initial state and whether it is accepting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct State {
    pub(crate) id: StateIndex,
    pub(crate) initial: bool,
    pub(crate) accepting: bool,
}

impl State {
    /// Creates a new state with the given id and flags.
    pub fn new(id: StateIndex, initial: bool, accepting: bool) -> Self {
        Self {
            id,
            initial,
            accepting,
        }
    }

    /// Returns the identifier of the state.
    pub fn id(&self) -> StateIndex {
        self.id
    }

    /// Returns true if the state is flagged as initial.
    pub fn is_initial(&self) -> bool {
        self.initial
    }

    /// Returns true if the state is flagged as accepting.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }
}

impl Show for State {
    fn show(&self) -> String {
        format!("q{}", self.id)
    }
}
