use bit_set::BitSet;
use owo_colors::OwoColorize;
use tracing::{debug, info, trace, warn};

use crate::{operations::fold, prefix_tree, Automaton, Sample, StateIndex};

/// Keeps track of the red states, which have been fixed, and the blue states, which are
/// waiting to be either merged with a red state or promoted to red themselves. Blue states
/// are processed in the reverse order of their discovery.
#[derive(Debug, Clone)]
struct Frontier {
    red: Vec<StateIndex>,
    blue: Vec<StateIndex>,
    visited: BitSet,
}

impl Frontier {
    /// The initial state is the only red state and its successors make up the blue states.
    fn rooted_at(aut: &Automaton, initial: StateIndex) -> Self {
        let mut frontier = Self {
            red: vec![initial],
            blue: vec![],
            visited: BitSet::with_capacity(aut.max_state()),
        };
        frontier.visited.insert(initial);
        frontier.discover(aut, initial);
        frontier
    }

    fn discover(&mut self, aut: &Automaton, q: StateIndex) {
        for p in aut.successors(q) {
            if self.visited.insert(p) {
                self.blue.push(p);
            }
        }
    }

    fn promote(&mut self, aut: &Automaton, q: StateIndex) {
        self.red.push(q);
        self.discover(aut, q);
    }
}

/// The RPNI algorithm, which generalizes the prefix tree acceptor of a set of positive words
/// by merging states as long as no negative word becomes accepted.
///
/// Starting with the initial state as the only red state, the successors of red states are
/// considered one after another. Each such blue state is merged (see [`fold`]) with the first red
/// state for which the resulting automaton rejects all negative words. After a successful merge,
/// the bookkeeping restarts from the initial state of the merged automaton. If no merge is
/// possible, the blue state becomes red and its successors become blue.
///
/// # Example
/// ```
/// use rpni::prelude::*;
///
/// let tree = prefix_tree(["a", "aa", "aaa"]);
/// let learned = Rpni::new(["", "b"]).infer(tree);
/// assert!(learned.accepts("aaaaaa"));
/// assert!(!learned.accepts(""));
/// assert!(!learned.accepts("ab"));
/// ```
pub struct Rpni<'a> {
    negative: Vec<String>,
    observer: Option<Box<dyn FnMut(&Automaton) + 'a>>,
}

impl<'a> Rpni<'a> {
    /// Creates a new instance that uses the given negative words to validate merges.
    pub fn new<I, W>(negative: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        Self {
            negative: negative.into_iter().map(Into::into).collect(),
            observer: None,
        }
    }

    /// Registers a function that is called with the current hypothesis before each blue state is
    /// processed. This can for example be used for printing intermediate results.
    pub fn with_observer<F: FnMut(&Automaton) + 'a>(mut self, observer: F) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Returns true if `aut` rejects every negative word.
    fn rejects_negatives(&self, aut: &Automaton) -> bool {
        match self.negative.iter().find(|w| aut.accepts(w)) {
            Some(w) => {
                trace!("candidate accepts negative word \"{w}\"");
                false
            }
            None => true,
        }
    }

    /// Tries to merge `blue` with each of the `red` states in order and returns the first
    /// result that rejects all negative words.
    fn try_merge(
        &self,
        aut: &Automaton,
        blue: StateIndex,
        red: &[StateIndex],
    ) -> Option<(StateIndex, Automaton)> {
        for &r in red.iter().filter(|&&r| r != blue) {
            match fold(aut, blue, r) {
                Ok(candidate) if self.rejects_negatives(&candidate) => return Some((r, candidate)),
                Ok(_) => {}
                Err(e) => warn!("skipping merge of q{blue} with q{r}: {e}"),
            }
        }
        None
    }

    /// Runs the algorithm starting from the given automaton, which is usually the prefix tree
    /// acceptor of the positive words, see [`prefix_tree()`].
    pub fn infer(mut self, tree: Automaton) -> Automaton {
        let mut hypothesis = tree;
        let Some(initial) = hypothesis.initial() else {
            warn!("automaton has no initial state, nothing to learn");
            return hypothesis;
        };
        let mut frontier = Frontier::rooted_at(&hypothesis, initial);
        let (mut merges, mut promotions) = (0usize, 0usize);

        while let Some(blue) = frontier.blue.pop() {
            if let Some(observer) = self.observer.as_mut() {
                observer(&hypothesis);
            }

            match self.try_merge(&hypothesis, blue, &frontier.red) {
                Some((red, merged)) => {
                    debug!(
                        "{} q{blue} with q{red}, {} states remain",
                        "merged".green(),
                        merged.size()
                    );
                    merges += 1;
                    hypothesis = merged;
                    let Some(initial) = hypothesis.initial() else {
                        warn!("merged automaton lost its initial state");
                        break;
                    };
                    frontier = Frontier::rooted_at(&hypothesis, initial);
                }
                None => {
                    debug!("{} q{blue}", "promoted".red());
                    promotions += 1;
                    frontier.promote(&hypothesis, blue);
                }
            }
            trace!(
                "red states {:?}, blue states {:?}",
                frontier.red,
                frontier.blue
            );
        }

        info!(
            "learned automaton with {} states using {merges} merges and {promotions} promotions",
            hypothesis.size()
        );
        hypothesis
    }
}

/// Executes the RPNI algorithm on the given sample, i.e. builds the prefix tree acceptor of the
/// positive words and generalizes it using [`Rpni`].
pub fn rpni(sample: &Sample) -> Automaton {
    Rpni::new(sample.negative_words()).infer(prefix_tree(sample.positive_words()))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::prelude::*;

    #[test_log::test]
    fn single_letter_language() {
        let learned = rpni(&Sample::new(["a", "aa"], ["b"]));
        assert!(learned.accepts("a"));
        assert!(learned.accepts("aa"));
        assert!(!learned.accepts("b"));
        // the initial state is merged with the accepting state reached by "a"
        assert!(learned.accepts(""));
        assert_eq!(learned.size(), 1);
    }

    #[test_log::test]
    fn empty_word_as_negative() {
        let calls = Cell::new(0);
        let learned = Rpni::new(["b", ""])
            .with_observer(|_| calls.set(calls.get() + 1))
            .infer(prefix_tree(["a", "aa"]));
        assert!(learned.accepts("a"));
        assert!(learned.accepts("aa"));
        assert!(learned.accepts("aaaa"));
        assert!(!learned.accepts("b"));
        assert!(!learned.accepts(""));
        assert_eq!(learned.state_indices().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn no_negatives_fold_maximally() {
        let learned = rpni(&Sample::new(["ab", "ba"], Vec::<String>::new()));
        assert_eq!(learned.size(), 1);
        assert_eq!(learned.initial(), Some(2));
        assert!(learned.accepts("ab"));
        assert!(learned.accepts("ba"));
        assert!(learned.accepts("abba"));
    }

    #[test]
    fn degenerate_samples() {
        let empty = rpni(&Sample::default());
        assert_eq!(empty.size(), 1);
        assert!(!empty.accepts(""));

        let epsilon = rpni(&Sample::new([""], ["a"]));
        assert_eq!(epsilon.size(), 1);
        assert!(epsilon.accepts(""));
        assert!(!epsilon.accepts("a"));

        assert_eq!(Rpni::new(["a"]).infer(Automaton::new()), Automaton::new());
    }

    #[test]
    fn learns_consistent_automaton() {
        let sample = Sample::new(
            ["", "aa", "b", "bb", "aab", "aba", "baa", "aaaa"],
            ["a", "ab", "ba", "aaa", "abb", "bab", "bba"],
        );
        let learned = rpni(&sample);
        assert!(sample.is_consistent_with(&learned));
        assert!(learned.size() < prefix_tree(sample.positive_words()).size());
        assert_eq!(resolve_one_conflict(&learned).unwrap(), learned);
    }

    #[test]
    fn runs_are_reproducible() {
        let sample = Sample::new(["ab", "abab", "b", "bab"], ["a", "aa", "ba", "abb"]);
        assert_eq!(rpni(&sample), rpni(&sample));
    }

    #[cfg(feature = "random")]
    #[test]
    fn random_samples_stay_consistent() {
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        for _ in 0..20 {
            let sample = generate_random_sample(
                &['a', 'b'],
                30,
                8,
                |w| w.chars().filter(|&c| c == 'a').count() % 2 == 0,
                &mut rng,
            );
            let learned = rpni(&sample);
            for w in sample.negative_words() {
                assert!(!learned.accepts(w), "negative word {w} is accepted");
            }
            assert_eq!(resolve_one_conflict(&learned).unwrap(), learned);
            assert_eq!(learned, rpni(&sample));
        }
    }
}
