/// Contains definitions for samples, which are collections of positive and
/// negative example words, as well as reading them from files and evaluating automata on them.
pub mod sample;
pub use sample::{read_wordlist, Evaluation, Sample, SampleError};

/// Module containing the red/blue state merging procedure of the RPNI algorithm.
pub mod red_blue;
pub use red_blue::{rpni, Rpni};
