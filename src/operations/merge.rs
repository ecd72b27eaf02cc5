use tracing::trace;

use super::AutomatonError;
use crate::{Automaton, StateIndex};

/// Merges the state `removed` into the state `kept`, producing a new automaton. Every edge that
/// starts or ends in `removed` is redirected to `kept`, where edges that end up connecting the same
/// two states are combined into one with the union of their labels. This may introduce
/// nondeterminism, which can be eliminated using [`super::fold`].
///
/// The surviving state is initial (resp. accepting) if at least one of the two merged states was,
/// all other states retain their flags.
///
/// # Example
/// ```
/// use rpni::prelude::*;
///
/// let tree = prefix_tree(["a", "b"]);
/// let merged = merge_states(&tree, 1, 2).unwrap();
/// assert_eq!(merged.size(), 2);
/// assert_eq!(merged.edges().len(), 1);
/// assert!(merged.accepts("b"));
/// ```
pub fn merge_states(
    aut: &Automaton,
    kept: StateIndex,
    removed: StateIndex,
) -> Result<Automaton, AutomatonError> {
    if kept == removed {
        return Err(AutomatonError::IdenticalStates(kept));
    }
    let survivor = *aut.state(kept).ok_or(AutomatonError::MissingState(kept))?;
    let victim = *aut.state(removed).ok_or(AutomatonError::MissingState(removed))?;

    let redirect = |q: StateIndex| if q == removed { kept } else { q };

    let mut merged = Automaton::new();
    for q in aut.states() {
        merged.add_state_with_id(q.id(), q.is_initial(), q.is_accepting());
    }
    for edge in aut.edges() {
        for &symbol in edge.label() {
            merged.add_transition(redirect(edge.source()), redirect(edge.target()), symbol);
        }
    }

    if let Some(q) = merged.state_mut(kept) {
        q.initial = survivor.is_initial() || victim.is_initial();
        q.accepting = survivor.is_accepting() || victim.is_accepting();
    }
    merged.remove_state(removed);

    trace!("merged q{removed} into q{kept}, {} states remain", merged.size());
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn chain() -> Automaton {
        // 0 -a-> 1 -a-> 2, 0 -b-> 3
        let mut aut = Automaton::new();
        aut.add_state(true, false);
        aut.add_state(false, true);
        aut.add_state(false, false);
        aut.add_state(false, true);
        aut.add_transition(0, 1, 'a');
        aut.add_transition(1, 2, 'a');
        aut.add_transition(0, 3, 'b');
        aut
    }

    #[test]
    fn flags_are_combined() {
        let aut = chain();
        let merged = merge_states(&aut, 2, 0).unwrap();
        let survivor = merged.state(2).unwrap();
        assert!(survivor.is_initial());
        assert!(!survivor.is_accepting());
        assert!(merged.state(1).unwrap().is_accepting());
        assert!(merged.state(3).unwrap().is_accepting());
        assert!(!merged.state(1).unwrap().is_initial());
        assert_eq!(merged.initial(), Some(2));

        let merged = merge_states(&aut, 0, 1).unwrap();
        let survivor = merged.state(0).unwrap();
        assert!(survivor.is_initial() && survivor.is_accepting());
    }

    #[test]
    fn edges_are_redirected_and_joined() {
        let aut = chain();
        let merged = merge_states(&aut, 1, 3).unwrap();
        assert_eq!(merged.state_indices().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(merged.edges().len(), 2);
        assert_eq!(merged.edges()[0].label(), &Label::from(['a', 'b']));
        assert!(merged.accepts("b"));

        let looped = merge_states(&aut, 0, 1).unwrap();
        assert_eq!(looped.edges()[0].source(), 0);
        assert_eq!(looped.edges()[0].target(), 0);
        assert!(looped.accepts("aaaa"));
    }

    #[test]
    fn input_is_untouched() {
        let aut = chain();
        let before = aut.clone();
        let _ = merge_states(&aut, 0, 3).unwrap();
        assert_eq!(aut, before);
        assert_eq!(aut.size(), 4);
    }

    #[test]
    fn invalid_merges() {
        let aut = chain();
        assert_eq!(
            merge_states(&aut, 1, 1),
            Err(AutomatonError::IdenticalStates(1))
        );
        assert_eq!(
            merge_states(&aut, 1, 7),
            Err(AutomatonError::MissingState(7))
        );
        assert_eq!(
            merge_states(&aut, 9, 1),
            Err(AutomatonError::MissingState(9))
        );
    }
}
