//! Storage for alphabet-encoded sequences and sequence collections.

use std::cmp::PartialEq;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::ops::Index;
use std::ops::Range;
use std::str::FromStr;

use super::abc::Alphabet;
use super::abc::Dna;
use super::abc::Symbol;
use super::err::Error;
use super::err::InvalidSymbol;

// --- EncodedSequence ---------------------------------------------------------

/// A biological sequence encoded with an alphabet.
#[derive(Clone, Debug, Eq)]
pub struct EncodedSequence<A: Alphabet = Dna> {
    alphabet: std::marker::PhantomData<A>,
    data: Vec<A::Symbol>,
}

impl<A: Alphabet> EncodedSequence<A> {
    /// Create a new encoded sequence.
    pub fn new(data: Vec<A::Symbol>) -> Self {
        Self {
            data,
            alphabet: std::marker::PhantomData,
        }
    }

    /// Create a new encoded sequence from a textual representation.
    pub fn encode(sequence: &str) -> Result<Self, InvalidSymbol> {
        sequence
            .chars()
            .map(A::Symbol::from_char)
            .collect::<Result<_, _>>()
            .map(Self::new)
    }

    /// Return the number of symbols in the sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// View the symbols of the sequence as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[A::Symbol] {
        self.data.as_slice()
    }

    /// Iterate over the symbols in the sequence.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, A::Symbol> {
        self.data.iter()
    }

    /// Get the symbols of the window of length `k` starting at `start`.
    ///
    /// # Panics
    ///
    /// Panics if the window does not fit in the sequence.
    #[inline]
    pub fn window(&self, start: usize, k: usize) -> &[A::Symbol] {
        &self.data[start..start + k]
    }

    /// Copy the symbols in `range` into a new encoded sequence.
    pub fn slice(&self, range: Range<usize>) -> Self {
        Self::new(self.data[range].to_vec())
    }

    /// Iterate over all the windows of length `k` in the sequence.
    ///
    /// Yields nothing when `k` is zero or exceeds the sequence length.
    pub fn windows(&self, k: usize) -> impl Iterator<Item = &[A::Symbol]> + '_ {
        let n = if k == 0 || k > self.len() {
            0
        } else {
            self.len() - k + 1
        };
        (0..n).map(move |i| self.window(i, k))
    }
}

impl<A: Alphabet> AsRef<EncodedSequence<A>> for EncodedSequence<A> {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl<A: Alphabet> AsRef<[<A as Alphabet>::Symbol]> for EncodedSequence<A> {
    fn as_ref(&self) -> &[<A as Alphabet>::Symbol] {
        self.data.as_slice()
    }
}

impl<A: Alphabet> Default for EncodedSequence<A> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<A: Alphabet> Display for EncodedSequence<A> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for c in self.data.iter() {
            write!(f, "{}", c.as_char())?;
        }
        Ok(())
    }
}

impl<A: Alphabet> FromStr for EncodedSequence<A> {
    type Err = InvalidSymbol;
    fn from_str(seq: &str) -> Result<Self, Self::Err> {
        Self::encode(seq)
    }
}

impl<A: Alphabet> From<Vec<A::Symbol>> for EncodedSequence<A> {
    fn from(data: Vec<A::Symbol>) -> Self {
        Self::new(data)
    }
}

impl<A: Alphabet> From<&[A::Symbol]> for EncodedSequence<A> {
    fn from(data: &[A::Symbol]) -> Self {
        Self::new(data.to_vec())
    }
}

impl<A: Alphabet> Index<usize> for EncodedSequence<A> {
    type Output = A::Symbol;
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<'a, A: Alphabet> IntoIterator for &'a EncodedSequence<A> {
    type Item = &'a A::Symbol;
    type IntoIter = std::slice::Iter<'a, A::Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<A, S> PartialEq<S> for EncodedSequence<A>
where
    A: Alphabet,
    S: AsRef<[<A as Alphabet>::Symbol]>,
{
    fn eq(&self, other: &S) -> bool {
        self.data.as_slice() == other.as_ref()
    }
}

// --- SequenceSet -------------------------------------------------------------

/// A non-empty collection of encoded sequences sharing the same length.
#[derive(Clone, Debug)]
pub struct SequenceSet<A: Alphabet = Dna> {
    sequences: Vec<EncodedSequence<A>>,
}

impl<A: Alphabet> SequenceSet<A> {
    /// Create a new collection from the given sequences.
    ///
    /// Fails if no sequences are given, or if the sequences do not all
    /// have the same length.
    pub fn new(sequences: Vec<EncodedSequence<A>>) -> Result<Self, Error> {
        let expected = match sequences.first() {
            None => return Err(Error::EmptySequenceSet),
            Some(first) => first.len(),
        };
        for (index, seq) in sequences.iter().enumerate() {
            if seq.len() != expected {
                return Err(Error::InconsistentLength {
                    index,
                    expected,
                    found: seq.len(),
                });
            }
        }
        Ok(Self { sequences })
    }

    /// Encode a collection from textual sequences.
    pub fn encode<I>(sequences: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        <I as IntoIterator>::Item: AsRef<str>,
    {
        sequences
            .into_iter()
            .map(|s| EncodedSequence::encode(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(Error::from)
            .and_then(Self::new)
    }

    /// The number of sequences in the collection.
    #[inline]
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Always `false`, a sequence collection cannot be empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// The length shared by all sequences of the collection.
    #[inline]
    pub fn sequence_length(&self) -> usize {
        self.sequences[0].len()
    }

    /// Iterate over the sequences of the collection.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, EncodedSequence<A>> {
        self.sequences.iter()
    }

    /// Check that a motif of length `k` can be searched in the collection.
    pub fn check_motif_length(&self, k: usize) -> Result<(), Error> {
        if k == 0 {
            Err(Error::InvalidMotifLength(k))
        } else if k > self.sequence_length() {
            Err(Error::MotifTooLong {
                k,
                length: self.sequence_length(),
            })
        } else {
            Ok(())
        }
    }
}

impl<A: Alphabet> AsRef<[EncodedSequence<A>]> for SequenceSet<A> {
    fn as_ref(&self) -> &[EncodedSequence<A>] {
        &self.sequences
    }
}

impl<A: Alphabet> Index<usize> for SequenceSet<A> {
    type Output = EncodedSequence<A>;
    fn index(&self, index: usize) -> &Self::Output {
        &self.sequences[index]
    }
}

impl<'a, A: Alphabet> IntoIterator for &'a SequenceSet<A> {
    type Item = &'a EncodedSequence<A>;
    type IntoIter = std::slice::Iter<'a, EncodedSequence<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sequences.iter()
    }
}
