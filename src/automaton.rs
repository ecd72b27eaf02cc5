use itertools::Itertools;
use owo_colors::OwoColorize;
use tracing::{trace, warn};

use crate::Show;

mod state;
pub use state::{State, StateIndex};

mod edge;
pub use edge::{Edge, Label};

mod run;

/// The type of symbols that label the edges of an [`Automaton`].
pub type Symbol = char;

/// A finite automaton that is stored as a list of [`State`]s together with a list of [`Edge`]s,
/// edges refer to states only through their [`StateIndex`]. This means the automaton may contain
/// arbitrary cycles without any issues regarding ownership.
///
/// The automaton does not enforce determinism, a state may have several outgoing edges whose labels
/// overlap. For each ordered pair of states there is, however, at most one edge, adding another
/// transition between the same two states extends the label of the existing edge.
///
/// Operations that transform an automaton as a whole (see [`crate::operations`]) never modify their
/// input and instead produce a new value.
///
/// # Example
/// ```
/// use rpni::prelude::*;
///
/// let mut aut = Automaton::new();
/// let q0 = aut.add_state(true, false);
/// let q1 = aut.add_state(false, true);
/// aut.add_transition(q0, q1, 'a');
/// aut.add_transition(q0, q1, 'b');
/// assert_eq!(aut.edges().len(), 1);
/// assert!(aut.accepts("a"));
/// assert!(aut.accepts("b"));
/// assert!(!aut.accepts("ab"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Automaton {
    max_state: StateIndex,
    states: Vec<State>,
    edges: Vec<Edge>,
}

impl Automaton {
    /// Creates a new automaton without any states or edges.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new state with the given flags and returns its identifier, which is one larger than
    /// the largest identifier currently in use.
    pub fn add_state(&mut self, initial: bool, accepting: bool) -> StateIndex {
        let id = self.max_state;
        self.states.push(State::new(id, initial, accepting));
        self.max_state = id + 1;
        id
    }

    /// Adds a state with an explicitly given identifier. This is used when rebuilding an automaton,
    /// as it allows preserving identifiers. If a state with the same identifier already exists,
    /// nothing happens apart from a warning being emitted, and `false` is returned.
    pub fn add_state_with_id(&mut self, id: StateIndex, initial: bool, accepting: bool) -> bool {
        if self.contains_state(id) {
            warn!("attempting to duplicate state {id}, ignoring");
            return false;
        }
        self.states.push(State::new(id, initial, accepting));
        self.max_state = self.max_state.max(id + 1);
        true
    }

    /// Adds a transition from `source` to `target` on the symbol `on`. If an edge between these
    /// two states exists already, `on` is added to its label. Otherwise a new edge is created.
    pub fn add_transition(&mut self, source: StateIndex, target: StateIndex, on: Symbol) {
        debug_assert!(self.contains_state(source) && self.contains_state(target));
        if let Some(edge) = self
            .edges
            .iter_mut()
            .find(|e| e.source == source && e.target == target)
        {
            edge.label.insert(on);
            return;
        }
        self.edges.push(Edge::new(source, on, target));
    }

    /// Removes the state with the given identifier together with all edges that are incident to it.
    /// The remaining states keep their identifiers. Returns the removed state if it existed.
    pub fn remove_state(&mut self, id: StateIndex) -> Option<State> {
        let position = self.states.iter().position(|q| q.id == id)?;
        let removed = self.states.remove(position);
        self.edges.retain(|e| e.source != id && e.target != id);
        self.max_state = self.states.iter().map(|q| q.id + 1).max().unwrap_or(0);
        trace!("removed state {}", removed.show());
        Some(removed)
    }

    /// Looks up the first edge leaving `source` whose label contains `on`. Returns `None`
    /// if no such edge exists.
    pub fn transition_from(&self, source: StateIndex, on: Symbol) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.matches(on))
    }

    /// Returns an iterator over all edges that leave `source`, in the order they were created.
    pub fn transitions_from(&self, source: StateIndex) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.source == source)
    }

    /// Returns the targets of all edges leaving `source` in the order of the edges.
    pub fn successors(&self, source: StateIndex) -> impl Iterator<Item = StateIndex> + '_ {
        self.transitions_from(source).map(|e| e.target)
    }

    /// Looks up the state with identifier `id`.
    pub fn state(&self, id: StateIndex) -> Option<&State> {
        self.states.iter().find(|q| q.id == id)
    }

    pub(crate) fn state_mut(&mut self, id: StateIndex) -> Option<&mut State> {
        self.states.iter_mut().find(|q| q.id == id)
    }

    /// Returns true if a state with identifier `id` exists.
    pub fn contains_state(&self, id: StateIndex) -> bool {
        self.state(id).is_some()
    }

    /// Gives the first state that is flagged as initial, if one exists.
    pub fn initial(&self) -> Option<StateIndex> {
        self.states.iter().find(|q| q.initial).map(|q| q.id)
    }

    /// Sets the accepting flag of the given state. Returns `false` if the state does not exist.
    pub fn set_accepting(&mut self, id: StateIndex, accepting: bool) -> bool {
        match self.state_mut(id) {
            Some(q) => {
                q.accepting = accepting;
                true
            }
            None => false,
        }
    }

    /// Returns the states in the order in which they were added.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Returns the edges in the order in which they were created.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns an iterator over the identifiers of all states, in insertion order.
    pub fn state_indices(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.states.iter().map(|q| q.id)
    }

    /// The number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// One larger than the largest identifier that is in use, or 0 if there are no states.
    pub fn max_state(&self) -> StateIndex {
        self.max_state
    }

    /// Returns true if no state has two distinct outgoing edges whose labels share a symbol.
    /// Note that this is stricter than what [`crate::operations::fold`] establishes, which only
    /// removes conflicts between edges with identical labels.
    pub fn is_deterministic(&self) -> bool {
        self.state_indices().all(|q| {
            self.transitions_from(q)
                .collect_vec()
                .into_iter()
                .tuple_combinations()
                .all(|(l, r): (&Edge, &Edge)| l.label.is_disjoint(&r.label))
        })
    }

    /// Builds a string representation of the automaton as a table, listing each state with
    /// its flags and its outgoing edges.
    pub fn build_transition_table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(["State", "Initial", "Accepting", "Edges"]);
        for q in &self.states {
            let ident = if q.accepting {
                q.show().bold().to_string()
            } else {
                q.show()
            };
            builder.push_record([
                ident,
                q.initial.show(),
                q.accepting.show(),
                self.transitions_from(q.id)
                    .map(|e| format!("{} -> q{}", e.show_label(), e.target))
                    .join(", "),
            ]);
        }
        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

/// Two automata are equal if their sequences of state identifiers coincide and their edge lists
/// (taking source, target and label into account) are identical. This is a purely syntactic
/// comparison, isomorphic automata with different identifiers are not equal. The flags of states
/// are not taken into account.
impl PartialEq for Automaton {
    fn eq(&self, other: &Self) -> bool {
        self.state_indices().eq(other.state_indices()) && self.edges == other.edges
    }
}

impl Eq for Automaton {}

impl Show for Automaton {
    fn show(&self) -> String {
        self.build_transition_table()
    }
}

impl std::fmt::Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.build_transition_table())
    }
}
