use std::collections::VecDeque;

use bit_set::BitSet;
use itertools::Itertools;
use tracing::trace;

use super::{merge_states, AutomatonError};
use crate::{Automaton, Edge, Show, StateIndex};

/// Searches the states reachable from the initial state in breadth-first order for a state that has
/// two outgoing edges with identical labels leading to different targets. For the first such pair
/// that is found, the two targets are merged and the result is returned. If no state has such a
/// pair of edges, an unchanged copy is returned.
///
/// Edges whose labels overlap without being equal are not considered to be in conflict.
pub fn resolve_one_conflict(aut: &Automaton) -> Result<Automaton, AutomatonError> {
    let Some(initial) = aut.initial() else {
        return Ok(aut.clone());
    };

    let mut seen = BitSet::with_capacity(aut.max_state());
    let mut queue = VecDeque::from([initial]);
    seen.insert(initial);

    while let Some(q) = queue.pop_front() {
        let outgoing = aut.transitions_from(q).collect_vec();
        if let Some((kept, removed)) = first_conflict(&outgoing) {
            trace!(
                "state q{q} has conflicting edges to q{kept} and q{removed} on {}",
                outgoing
                    .iter()
                    .find(|e| e.target() == kept)
                    .map(|e| e.show())
                    .unwrap_or_default()
            );
            return merge_states(aut, kept, removed);
        }
        for p in outgoing.iter().map(|e| e.target()) {
            if seen.insert(p) {
                queue.push_back(p);
            }
        }
    }

    Ok(aut.clone())
}

fn first_conflict(outgoing: &[&Edge]) -> Option<(StateIndex, StateIndex)> {
    outgoing
        .iter()
        .cartesian_product(outgoing.iter())
        .find(|(l, r)| l.conflicts_with(r))
        .map(|(l, r)| (l.target(), r.target()))
}

/// Merges `kept` and `removed` using [`merge_states`] and afterwards repeatedly calls
/// [`resolve_one_conflict`] until the automaton no longer changes. In the result, no reachable
/// state has two outgoing edges with identical labels that lead to different targets.
///
/// Termination is guaranteed as every step either removes a state or reaches the fixpoint.
///
/// # Example
/// ```
/// use rpni::prelude::*;
///
/// let tree = prefix_tree(["aa", "ba"]);
/// let folded = fold(&tree, 1, 3).unwrap();
/// // merging the states reached by "a" and "b" also merges the states reached by "aa" and "ba"
/// assert_eq!(folded.size(), 3);
/// assert!(folded.accepts("aa") && folded.accepts("ba"));
/// ```
pub fn fold(
    aut: &Automaton,
    kept: StateIndex,
    removed: StateIndex,
) -> Result<Automaton, AutomatonError> {
    let mut current = merge_states(aut, kept, removed)?;
    let mut steps = 0usize;
    loop {
        let next = resolve_one_conflict(&current)?;
        if next == current {
            trace!("fold of q{removed} into q{kept} stabilized after {steps} steps");
            return Ok(next);
        }
        current = next;
        steps += 1;
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn assert_no_conflicts(aut: &Automaton) {
        for q in aut.state_indices() {
            for l in aut.transitions_from(q) {
                for r in aut.transitions_from(q) {
                    assert!(
                        !l.conflicts_with(r),
                        "conflict between {} and {}",
                        l.show(),
                        r.show()
                    );
                }
            }
        }
    }

    #[test]
    fn resolves_first_conflict_only() {
        // 0 -a-> 1, 0 -a-> 2, 1 -b-> 3, 1 -b-> 4
        let mut aut = Automaton::new();
        for i in 0..5 {
            aut.add_state(i == 0, i >= 3);
        }
        aut.add_transition(0, 1, 'a');
        aut.add_transition(0, 2, 'a');
        aut.add_transition(1, 3, 'b');
        aut.add_transition(1, 4, 'b');

        let once = resolve_one_conflict(&aut).unwrap();
        assert_eq!(once.state_indices().collect::<Vec<_>>(), vec![0, 1, 3, 4]);

        let twice = resolve_one_conflict(&once).unwrap();
        assert_eq!(twice.state_indices().collect::<Vec<_>>(), vec![0, 1, 3]);

        let thrice = resolve_one_conflict(&twice).unwrap();
        assert_eq!(thrice, twice);
    }

    #[test]
    fn overlapping_labels_are_left_alone() {
        let mut aut = Automaton::new();
        aut.add_state(true, false);
        aut.add_state(false, true);
        aut.add_state(false, false);
        aut.add_transition(0, 1, 'a');
        aut.add_transition(0, 1, 'b');
        aut.add_transition(0, 2, 'a');

        let resolved = resolve_one_conflict(&aut).unwrap();
        assert_eq!(resolved, aut);
        assert!(!resolved.is_deterministic());
    }

    #[test]
    fn unreachable_conflicts_are_ignored() {
        let mut aut = Automaton::new();
        aut.add_state(true, false);
        aut.add_state(false, false);
        aut.add_state(false, false);
        aut.add_state(false, false);
        aut.add_transition(1, 2, 'a');
        aut.add_transition(1, 3, 'a');
        assert_eq!(resolve_one_conflict(&aut).unwrap(), aut);
    }

    #[test_log::test]
    fn fold_reaches_fixpoint() {
        let tree = prefix_tree(["aab", "bab", "ba", "abb"]);
        let folded = fold(&tree, 1, 5).unwrap();
        assert_no_conflicts(&folded);
        assert!(folded.size() < tree.size());
        for w in ["aab", "bab", "ba", "abb"] {
            assert!(folded.accepts(w));
        }
        assert_eq!(resolve_one_conflict(&folded).unwrap(), folded);
    }

    #[test]
    fn fold_with_initial_state() {
        let tree = prefix_tree(["a", "aa", "aaa"]);
        let folded = fold(&tree, 1, 0).unwrap();
        assert_eq!(folded.size(), 1);
        assert_eq!(folded.initial(), Some(1));
        assert!(folded.accepts(""));
        assert!(folded.accepts("aaaaa"));
    }
}
