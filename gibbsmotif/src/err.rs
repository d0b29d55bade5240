//! Error types for the motif sampler.

use std::fmt::Display;
use std::fmt::Formatter;

/// The given character is not a valid symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSymbol(pub char);

impl Display for InvalidSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid symbol: {:?}", self.0)
    }
}

impl std::error::Error for InvalidSymbol {}

/// An error raised by the motif sampler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A sequence contains a character outside of the alphabet.
    InvalidSymbol(char),
    /// No sequences were given.
    EmptySequenceSet,
    /// No motifs were given.
    EmptyMotifSet,
    /// A sequence or motif does not have the same length as the previous ones.
    InconsistentLength {
        index: usize,
        expected: usize,
        found: usize,
    },
    /// The motif length is zero.
    InvalidMotifLength(usize),
    /// The motif length exceeds the length of the sequences.
    MotifTooLong { k: usize, length: usize },
    /// The number of iterations is zero.
    InvalidIterations(usize),
    /// The number of seeds is zero.
    InvalidSeedCount(usize),
    /// All window likelihoods of a sequence are zero or not finite.
    DegenerateLikelihoods,
    /// The worker pool could not be created.
    ThreadPool(String),
}

impl From<InvalidSymbol> for Error {
    fn from(error: InvalidSymbol) -> Self {
        Error::InvalidSymbol(error.0)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidSymbol(c) => write!(f, "invalid symbol: {:?}", c),
            Error::EmptySequenceSet => f.write_str("empty sequence collection"),
            Error::EmptyMotifSet => f.write_str("empty motif set"),
            Error::InconsistentLength {
                index,
                expected,
                found,
            } => write!(
                f,
                "inconsistent length at index {}: expected {}, found {}",
                index, expected, found
            ),
            Error::InvalidMotifLength(k) => write!(f, "invalid motif length: {}", k),
            Error::MotifTooLong { k, length } => write!(
                f,
                "motif length {} exceeds sequence length {}",
                k, length
            ),
            Error::InvalidIterations(n) => write!(f, "invalid number of iterations: {}", n),
            Error::InvalidSeedCount(n) => write!(f, "invalid number of seeds: {}", n),
            Error::DegenerateLikelihoods => {
                f.write_str("all window likelihoods are zero or not finite")
            }
            Error::ThreadPool(msg) => write!(f, "failed to build thread pool: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::MotifTooLong { k: 12, length: 10 };
        assert_eq!(err.to_string(), "motif length 12 exceeds sequence length 10");
        let err = Error::from(InvalidSymbol('N'));
        assert_eq!(err, Error::InvalidSymbol('N'));
        assert_eq!(err.to_string(), "invalid symbol: 'N'");
    }
}
