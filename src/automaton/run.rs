use tracing::trace;

use super::{Automaton, StateIndex};

impl Automaton {
    /// Runs `word` from the given state, always following the first edge whose label matches the
    /// current symbol. Returns the reached state, or `None` as soon as some symbol cannot be read.
    pub fn reached_state_from(&self, from: StateIndex, word: &str) -> Option<StateIndex> {
        let mut current = from;
        for (position, symbol) in word.chars().enumerate() {
            match self.transition_from(current, symbol) {
                Some(edge) => current = edge.target(),
                None => {
                    trace!("run of \"{word}\" is stuck in q{current} at position {position}");
                    return None;
                }
            }
        }
        Some(current)
    }

    /// Runs `word` from the initial state, see [`Self::reached_state_from`].
    pub fn reached_state(&self, word: &str) -> Option<StateIndex> {
        self.reached_state_from(self.initial()?, word)
    }

    /// Decides whether the automaton accepts `word`. This is the case if the run from the initial
    /// state can read the whole word and ends in an accepting state. For the empty word, this
    /// means the initial state itself must be accepting. An automaton without an initial state
    /// accepts nothing.
    pub fn accepts(&self, word: &str) -> bool {
        self.reached_state(word)
            .and_then(|q| self.state(q))
            .map(|q| q.is_accepting())
            .unwrap_or(false)
    }
}
