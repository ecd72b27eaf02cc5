use std::collections::BTreeSet;

use itertools::Itertools;

use crate::{Show, StateIndex, Symbol};

/// The label of an [`Edge`], which is a set of symbols. Using an ordered set means that two labels
/// compare equal precisely if they contain the same symbols, regardless of insertion order.
pub type Label = BTreeSet<Symbol>;

/// A directed edge between two states that is labeled with a set of symbols. An
/// [`Automaton`](crate::Automaton) has at most one edge for each ordered pair of
/// source and target.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub(crate) source: StateIndex,
    pub(crate) target: StateIndex,
    pub(crate) label: Label,
}

impl Edge {
    /// Creates a new edge from `source` to `target` whose label consists only of `on`.
    pub fn new(source: StateIndex, on: Symbol, target: StateIndex) -> Self {
        Self {
            source,
            target,
            label: Label::from([on]),
        }
    }

    /// The state in which the edge originates.
    pub fn source(&self) -> StateIndex {
        self.source
    }

    /// The state that the edge points to.
    pub fn target(&self) -> StateIndex {
        self.target
    }

    /// Returns a reference to the set of symbols that the edge is labeled with.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Returns true if the edge can be taken on symbol `on`.
    pub fn matches(&self, on: Symbol) -> bool {
        self.label.contains(&on)
    }

    /// Returns true if `self` and `other` are labeled with exactly the same set of symbols
    /// but lead to different targets. Labels that merely overlap do not constitute a conflict.
    pub fn conflicts_with(&self, other: &Edge) -> bool {
        self.label == other.label && self.target != other.target
    }

    pub(crate) fn show_label(&self) -> String {
        self.label.iter().join("")
    }
}

impl Show for Edge {
    fn show(&self) -> String {
        format!("(q{}, {}, q{})", self.source, self.show_label(), self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicts_need_exactly_equal_labels() {
        let mut ab = Edge::new(0, 'a', 1);
        ab.label.insert('b');
        let a = Edge::new(0, 'a', 2);
        assert!(!ab.conflicts_with(&a));

        let mut ba = Edge::new(0, 'b', 2);
        ba.label.insert('a');
        assert!(ab.conflicts_with(&ba));

        let same_target = Edge::new(0, 'a', 1);
        assert!(!Edge::new(0, 'a', 1).conflicts_with(&same_target));
    }

    #[test]
    fn edge_show() {
        let mut e = Edge::new(3, 'b', 4);
        e.label.insert('a');
        assert_eq!(e.show(), "(q3, ab, q4)");
    }
}
