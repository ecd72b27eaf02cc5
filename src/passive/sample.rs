use std::{
    io::{BufRead, BufReader},
    path::Path,
};

use thiserror::Error;
use tracing::{debug, warn};

use crate::{Automaton, Set};

/// Error that may occur when reading a word list.
#[derive(Debug, Error)]
pub enum SampleError {
    /// The file exists but could not be read.
    #[error("could not read word list {path}: {source}")]
    Io {
        /// The offending path.
        path: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Reads a list of words from the file at `path`, where each line is one word. Empty lines
/// produce the empty word. If the file does not exist, an empty list is returned and a
/// warning is emitted.
pub fn read_wordlist<P: AsRef<Path>>(path: P) -> Result<Vec<String>, SampleError> {
    let path = path.as_ref();
    let io_error = |source| SampleError::Io {
        path: path.display().to_string(),
        source,
    };

    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("word list {} does not exist, using empty list", path.display());
            return Ok(vec![]);
        }
        Err(e) => return Err(io_error(e)),
    };

    let words = BufReader::new(file)
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_error)?;
    debug!("read {} words from {}", words.len(), path.display());
    Ok(words)
}

/// A finite sample, consisting of positive and negative example words. The words are kept in
/// the order in which they were given, and may contain duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sample {
    /// Words that should be accepted.
    pub positive: Vec<String>,
    /// Words that should be rejected.
    pub negative: Vec<String>,
}

impl Sample {
    /// Creates a new sample from the given positive and negative words.
    pub fn new<I, J, V, W>(positive: I, negative: J) -> Self
    where
        I: IntoIterator<Item = V>,
        J: IntoIterator<Item = W>,
        V: Into<String>,
        W: Into<String>,
    {
        Self {
            positive: positive.into_iter().map(Into::into).collect(),
            negative: negative.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads the positive and negative words from two word lists, see [`read_wordlist`].
    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        positive: P,
        negative: Q,
    ) -> Result<Self, SampleError> {
        Ok(Self {
            positive: read_wordlist(positive)?,
            negative: read_wordlist(negative)?,
        })
    }

    /// Gives an iterator over all positive words in the sample.
    pub fn positive_words(&self) -> impl Iterator<Item = &str> + '_ {
        self.positive.iter().map(String::as_str)
    }

    /// Gives an iterator over all negative words in the sample.
    pub fn negative_words(&self) -> impl Iterator<Item = &str> + '_ {
        self.negative.iter().map(String::as_str)
    }

    /// Total number of words, counting duplicates.
    pub fn count_words(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    /// Returns true if there are neither positive nor negative words.
    pub fn is_empty(&self) -> bool {
        self.count_words() == 0
    }

    /// Returns the words that are classified as both positive and negative, in the order in which
    /// they appear among the negative words. No automaton can be consistent with a sample that
    /// contains such a word.
    pub fn conflicting_words(&self) -> Vec<&str> {
        let positive: Set<&str> = self.positive_words().collect();
        let mut seen = Set::default();
        self.negative_words()
            .filter(|w| positive.contains(w) && seen.insert(*w))
            .collect()
    }

    /// Checks whether `aut` accepts all positive and rejects all negative words.
    pub fn is_consistent_with(&self, aut: &Automaton) -> bool {
        self.positive_words().all(|w| aut.accepts(w))
            && !self.negative_words().any(|w| aut.accepts(w))
    }

    /// Classifies every word of the sample with `aut`, see [`Evaluation`].
    pub fn evaluate(&self, aut: &Automaton) -> Evaluation {
        Evaluation {
            true_positives: self.positive_words().filter(|w| aut.accepts(w)).count(),
            positives: self.positive.len(),
            true_negatives: self.negative_words().filter(|w| !aut.accepts(w)).count(),
            negatives: self.negative.len(),
        }
    }
}

/// The result of classifying the words of a [`Sample`] with an automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Evaluation {
    /// Number of positive words that were accepted.
    pub true_positives: usize,
    /// Number of positive words.
    pub positives: usize,
    /// Number of negative words that were rejected.
    pub true_negatives: usize,
    /// Number of negative words.
    pub negatives: usize,
}

impl Evaluation {
    /// Number of words that were classified correctly.
    pub fn correct(&self) -> usize {
        self.true_positives + self.true_negatives
    }

    /// Number of words that were classified.
    pub fn total(&self) -> usize {
        self.positives + self.negatives
    }

    /// The fraction of correctly classified words, or `None` if there were no words at all.
    pub fn accuracy(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.correct() as f64 / total as f64),
        }
    }
}
