//! Library for passively learning deterministic finite automata from examples with the RPNI
//! (regular positive and negative inference) algorithm.
//!
//! The central type is [`Automaton`], which stores states and labeled edges in flat lists and refers
//! to states by their [`StateIndex`]. Edges carry a set of symbols as label and there is at most one
//! edge between each ordered pair of states. Automata are generally not assumed to be deterministic,
//! as merging two states of a deterministic automaton may well produce nondeterminism.
//!
//! Learning proceeds in the following steps
//! - the positive example words are turned into a tree-shaped acceptor by [`prefix_tree()`],
//! - the [`Rpni`] driver repeatedly merges states of this tree using [`operations::fold`], which
//!   joins two states with [`operations::merge_states`] and then merges further states until no
//!   state has two edges with the same label leading to different states,
//! - a merge is only kept if the resulting automaton still rejects all negative example words.
//!
//! Transformations never modify their input, they produce new automata instead. This makes it
//! possible to evaluate (and discard) candidate merges while keeping the current hypothesis intact.
//!
//! # Example
//! ```
//! use rpni::prelude::*;
//!
//! let sample = Sample::new(["", "aa", "b", "aab", "aba"], ["a", "ab", "aaa"]);
//! let learned = rpni(&sample);
//! assert!(sample.is_consistent_with(&learned));
//! assert!(learned.accepts("aaaa"));
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use rpni::prelude::*;` should be enough to use the package.
pub mod prelude {
    #[cfg(feature = "random")]
    pub use super::random::{generate_random_sample, generate_random_word, generate_random_words};
    pub use super::{
        automaton::{Automaton, Edge, Label, State, StateIndex, Symbol},
        dot::Dottable,
        operations::{fold, merge_states, resolve_one_conflict, AutomatonError},
        passive::{read_wordlist, rpni, Evaluation, Rpni, Sample, SampleError},
        prefix_tree::prefix_tree,
        Show,
    };
}

/// Defines the automaton data structure, as well as running words on it.
pub mod automaton;
pub use automaton::{Automaton, Edge, Label, State, StateIndex, Symbol};

/// Building prefix tree acceptors from collections of words.
pub mod prefix_tree;
pub use prefix_tree::prefix_tree;

pub mod operations;

/// Contains the RPNI learner together with the samples it learns from.
pub mod passive;
pub use passive::{rpni, Rpni, Sample};

/// Outputting automata in the DOT format of graphviz.
pub mod dot;

/// Implements the generation of random words and samples.
#[cfg(feature = "random")]
pub mod random;

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;

/// Helper trait which can be used to display states, transitions and such.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state that should be
    /// for example q0, q1, q2, ... and for an edge (q0, a, q1).
    fn show(&self) -> String;
}

impl Show for bool {
    fn show(&self) -> String {
        match self {
            true => "+",
            false => "-",
        }
        .to_string()
    }
}

impl Show for String {
    fn show(&self) -> String {
        format!("\"{self}\"")
    }
}

impl<S: Show> Show for [S] {
    fn show(&self) -> String {
        format!(
            "{{{}}}",
            itertools::Itertools::join(&mut self.iter().map(|x| x.show()), ", ")
        )
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        self.as_slice().show()
    }
}

impl<S: Show + ?Sized> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}
