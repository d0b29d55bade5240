//! Digital encoding for DNA sequences using an alphabet.

use std::fmt::Debug;

use generic_array::ArrayLength;
use generic_array::GenericArray;
use typenum::consts::U4;
use typenum::marker_traits::NonZero;
use typenum::marker_traits::Unsigned;

use super::err::InvalidSymbol;

// --- Symbol ------------------------------------------------------------------

/// A symbol from a biological alphabet.
pub trait Symbol: Debug + Sized + Copy + Eq + Send + Sync {
    /// View this symbol as a zero-based index.
    fn as_index(&self) -> usize;
    /// View this symbol as a string character.
    fn as_char(&self) -> char {
        self.as_ascii() as char
    }
    /// Parse a string character into a symbol.
    fn from_char(c: char) -> Result<Self, InvalidSymbol> {
        if c.is_ascii() {
            Self::from_ascii(c as u8)
        } else {
            Err(InvalidSymbol(c))
        }
    }
    /// View this symbol as an ASCII charater.
    fn as_ascii(&self) -> u8;
    /// Parse an ASCII character into a symbol.
    fn from_ascii(c: u8) -> Result<Self, InvalidSymbol>;
}

// --- Alphabet ----------------------------------------------------------------

/// A biological alphabet with associated metadata.
pub trait Alphabet: Debug + Copy + Default + Send + Sync + 'static {
    type Symbol: Symbol;
    type K: Unsigned + NonZero + ArrayLength + Debug;

    /// Get all the symbols of this alphabet.
    ///
    /// The order of the symbols is the order of the columns of count
    /// matrices and profiles, and the priority order when breaking ties
    /// in a consensus.
    fn symbols() -> &'static [Self::Symbol];

    /// Get a string with all symbols from this alphabet.
    fn as_str() -> &'static str;
}

// --- DNA ---------------------------------------------------------------------

/// The DNA alphabet composed of the 4 deoxyribonucleotides.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dna;

impl Alphabet for Dna {
    type Symbol = Nucleotide;
    type K = U4;

    fn symbols() -> &'static [Nucleotide] {
        &[Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T]
    }

    fn as_str() -> &'static str {
        "ACGT"
    }
}

/// A deoxyribonucleotide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Nucleotide {
    /// Adenine.
    A = 0,
    /// Cytosine.
    C = 1,
    /// Guanine.
    G = 2,
    /// Thymine.
    T = 3,
}

impl From<Nucleotide> for char {
    fn from(n: Nucleotide) -> char {
        n.as_char()
    }
}

impl Symbol for Nucleotide {
    fn as_index(&self) -> usize {
        *self as usize
    }

    fn as_ascii(&self) -> u8 {
        match self {
            Nucleotide::A => b'A',
            Nucleotide::C => b'C',
            Nucleotide::G => b'G',
            Nucleotide::T => b'T',
        }
    }

    fn from_ascii(c: u8) -> Result<Self, InvalidSymbol> {
        match c {
            b'A' => Ok(Nucleotide::A),
            b'C' => Ok(Nucleotide::C),
            b'G' => Ok(Nucleotide::G),
            b'T' => Ok(Nucleotide::T),
            _ => Err(InvalidSymbol(c as char)),
        }
    }
}

// --- Pseudocounts ------------------------------------------------------------

/// A structure for storing the pseudocounts over an alphabet.
#[derive(Clone, Debug, PartialEq)]
pub struct Pseudocounts<A: Alphabet> {
    counts: GenericArray<f64, A::K>,
    alphabet: std::marker::PhantomData<A>,
}

impl<A: Alphabet> Pseudocounts<A> {
    /// The Laplace pseudocounts, adding one to every symbol count.
    pub fn laplace() -> Self {
        Self::from(1.0)
    }

    pub fn counts(&self) -> &[f64] {
        &self.counts
    }
}

impl<A: Alphabet> Default for Pseudocounts<A> {
    fn default() -> Self {
        Self::from(0.0)
    }
}

impl<A: Alphabet> From<GenericArray<f64, A::K>> for Pseudocounts<A> {
    fn from(counts: GenericArray<f64, A::K>) -> Self {
        Self {
            alphabet: std::marker::PhantomData,
            counts,
        }
    }
}

impl<A: Alphabet> From<f64> for Pseudocounts<A> {
    fn from(count: f64) -> Self {
        let mut counts = GenericArray::default();
        for x in counts.iter_mut() {
            *x = count;
        }
        Self {
            counts,
            alphabet: std::marker::PhantomData,
        }
    }
}

impl<A: Alphabet> AsRef<[f64]> for Pseudocounts<A> {
    fn as_ref(&self) -> &[f64] {
        &self.counts
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_symbol_order() {
        let symbols = Dna::symbols();
        assert_eq!(symbols.len(), <<Dna as Alphabet>::K as Unsigned>::USIZE);
        for (i, s) in symbols.iter().enumerate() {
            assert_eq!(s.as_index(), i);
            assert_eq!(s.as_char(), Dna::as_str().chars().nth(i).unwrap());
        }
    }

    #[test]
    fn test_from_char() {
        assert_eq!(Nucleotide::from_char('G'), Ok(Nucleotide::G));
        assert_eq!(Nucleotide::from_char('N'), Err(InvalidSymbol('N')));
        assert_eq!(Nucleotide::from_char('a'), Err(InvalidSymbol('a')));
        assert_eq!(Nucleotide::from_char('é'), Err(InvalidSymbol('é')));
    }

    #[test]
    fn test_pseudocounts() {
        let p = Pseudocounts::<Dna>::laplace();
        assert_eq!(p.counts(), &[1.0, 1.0, 1.0, 1.0]);
        let p = Pseudocounts::<Dna>::default();
        assert_eq!(p.counts(), &[0.0, 0.0, 0.0, 0.0]);
    }
}
