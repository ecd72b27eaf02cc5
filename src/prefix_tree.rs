use tracing::trace;

use crate::Automaton;

/// Builds the prefix tree acceptor for the given collection of words. The tree consists of a
/// non-accepting initial state from which every word can be read along a unique path, whose last
/// state is accepting. Words that share a prefix share the corresponding part of the path, so no
/// state has two outgoing edges on the same symbol.
///
/// # Example
/// ```
/// use rpni::prelude::*;
///
/// let tree = prefix_tree(["ab", "ac", "b"]);
/// assert_eq!(tree.size(), 5);
/// assert!(tree.accepts("ac"));
/// assert!(!tree.accepts("a"));
/// ```
pub fn prefix_tree<I, W>(words: I) -> Automaton
where
    I: IntoIterator<Item = W>,
    W: AsRef<str>,
{
    let mut tree = Automaton::new();
    let root = tree.add_state(true, false);

    for word in words {
        let word = word.as_ref();
        let mut current = root;
        for symbol in word.chars() {
            current = match tree.transition_from(current, symbol) {
                Some(edge) => edge.target(),
                None => {
                    let successor = tree.add_state(false, false);
                    tree.add_transition(current, successor, symbol);
                    successor
                }
            };
        }
        trace!("\"{word}\" reaches q{current}");
        tree.set_accepting(current, true);
    }

    tree
}

#[cfg(test)]
mod tests {
    use super::prefix_tree;

    #[test]
    fn accepts_exactly_the_sample() {
        let words = ["", "a", "ab", "abb", "ba", "bab"];
        let tree = prefix_tree(words);
        assert!(tree.is_deterministic());
        assert_eq!(tree.size(), 7);
        for w in words {
            assert!(tree.accepts(w), "{w} should be accepted");
        }
        for w in ["b", "aa", "abba", "bb", "c"] {
            assert!(!tree.accepts(w), "{w} should be rejected");
        }
    }

    #[test]
    fn shared_prefixes_are_reused() {
        let tree = prefix_tree(["aaa", "aab", "aa", "aaa"]);
        assert_eq!(tree.size(), 5);
        assert_eq!(tree.edges().len(), 4);
        assert!(tree.accepts("aa"));
        assert!(!tree.accepts("a"));
    }

    #[test]
    fn degenerate_samples() {
        let empty = prefix_tree(Vec::<String>::new());
        assert_eq!(empty.size(), 1);
        assert!(!empty.accepts(""));

        let epsilon = prefix_tree([""]);
        assert_eq!(epsilon.size(), 1);
        assert!(epsilon.accepts(""));
        assert!(epsilon.edges().is_empty());
    }
}
