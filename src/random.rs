use tracing::debug;

use crate::{Sample, Set, Symbol};

/// Generate a random `String` over the given `alphabet`. The length of the word is drawn
/// uniformly from the range `min_len..=max_len`.
pub fn generate_random_word(
    alphabet: &[Symbol],
    min_len: usize,
    max_len: usize,
    rng: &mut fastrand::Rng,
) -> String {
    assert!(
        !alphabet.is_empty() || max_len == 0,
        "cannot draw symbols from an empty alphabet"
    );
    let length = rng.usize(min_len..=max_len);
    (0..length)
        .map(|_| alphabet[rng.usize(..alphabet.len())])
        .collect()
}

/// Draws `count` random words using [`generate_random_word`] and returns the distinct ones, in the
/// order in which they were first drawn.
pub fn generate_random_words(
    alphabet: &[Symbol],
    count: usize,
    min_len: usize,
    max_len: usize,
    rng: &mut fastrand::Rng,
) -> Vec<String> {
    let mut seen = Set::default();
    (0..count)
        .map(|_| generate_random_word(alphabet, min_len, max_len, rng))
        .filter(|w| seen.insert(w.clone()))
        .collect()
}

/// Builds a random [`Sample`] from at most `count` distinct words of length up to `max_len`,
/// which are put into the positive or negative part depending on `classifier`.
pub fn generate_random_sample<F>(
    alphabet: &[Symbol],
    count: usize,
    max_len: usize,
    classifier: F,
    rng: &mut fastrand::Rng,
) -> Sample
where
    F: Fn(&str) -> bool,
{
    let (positive, negative): (Vec<_>, Vec<_>) =
        generate_random_words(alphabet, count, 0, max_len, rng)
            .into_iter()
            .partition(|w| classifier(w));
    debug!(
        "generated random sample with {} positive and {} negative words",
        positive.len(),
        negative.len()
    );
    Sample { positive, negative }
}
