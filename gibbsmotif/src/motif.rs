//! Motif sets and their consensus scoring.

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::ops::Index;

use generic_array::GenericArray;

use super::abc::Alphabet;
use super::abc::Dna;
use super::abc::Symbol;
use super::err::Error;
use super::pwm::Profile;
use super::seq::EncodedSequence;
use super::seq::SequenceSet;

/// Count the positions where `a` and `b` differ.
///
/// Only the overlap of the two inputs is compared, symbols past the end of
/// the shorter one are never counted as mismatches.
pub fn hamming<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter().zip(b.iter()).filter(|(x, y)| x != y).count()
}

// --- MotifSet ----------------------------------------------------------------

/// An ordered set of motif candidates of the same width.
///
/// Entry `i` is expected to be a window of sequence `i` of the collection
/// the motifs were drawn from. The set is never modified in place, see
/// [`MotifSet::replace`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MotifSet<A: Alphabet = Dna> {
    motifs: Vec<EncodedSequence<A>>,
}

impl<A: Alphabet> MotifSet<A> {
    /// Create a new motif set from the given motifs.
    ///
    /// Fails if no motifs are given, or if the motifs do not all have the
    /// same width.
    pub fn new(motifs: Vec<EncodedSequence<A>>) -> Result<Self, Error> {
        let expected = match motifs.first() {
            None => return Err(Error::EmptyMotifSet),
            Some(first) => first.len(),
        };
        for (index, motif) in motifs.iter().enumerate() {
            if motif.len() != expected {
                return Err(Error::InconsistentLength {
                    index,
                    expected,
                    found: motif.len(),
                });
            }
        }
        Ok(Self { motifs })
    }

    /// Encode a motif set from textual motifs.
    pub fn encode<I>(motifs: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        <I as IntoIterator>::Item: AsRef<str>,
    {
        motifs
            .into_iter()
            .map(|s| EncodedSequence::encode(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(Error::from)
            .and_then(Self::new)
    }

    /// The number of motifs in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.motifs.len()
    }

    /// Always `false`, a motif set cannot be empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.motifs.is_empty()
    }

    /// The width shared by all motifs of the set.
    #[inline]
    pub fn width(&self) -> usize {
        self.motifs[0].len()
    }

    /// Iterate over the motifs of the set.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, EncodedSequence<A>> {
        self.motifs.iter()
    }

    /// Iterate over all motifs of the set except the one at index `z`.
    pub fn holdout(&self, z: usize) -> impl Iterator<Item = &EncodedSequence<A>> + '_ {
        self.motifs
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != z)
            .map(|(_, m)| m)
    }

    /// Get a copy of this set with the motif at index `i` replaced.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn replace(&self, i: usize, motif: EncodedSequence<A>) -> Result<Self, Error> {
        if motif.len() != self.width() {
            return Err(Error::InconsistentLength {
                index: i,
                expected: self.width(),
                found: motif.len(),
            });
        }
        let mut motifs = self.motifs.clone();
        motifs[i] = motif;
        Ok(Self { motifs })
    }

    /// Build the majority-vote consensus of the motifs.
    ///
    /// Ties are broken in favor of the symbol coming first in
    /// [`Alphabet::symbols`], i.e. `A > C > G > T` for DNA.
    pub fn consensus(&self) -> EncodedSequence<A> {
        let symbols = A::symbols();
        let mut consensus = Vec::with_capacity(self.width());
        for j in 0..self.width() {
            let mut counts = GenericArray::<usize, A::K>::default();
            for motif in self.motifs.iter() {
                counts[motif[j].as_index()] += 1;
            }
            let mut best = symbols[0];
            for &s in symbols.iter().skip(1) {
                if counts[s.as_index()] > counts[best.as_index()] {
                    best = s;
                }
            }
            consensus.push(best);
        }
        EncodedSequence::new(consensus)
    }

    /// Compute the total Hamming distance of the motifs to their consensus.
    ///
    /// Lower is better, zero means all motifs are identical.
    pub fn score(&self) -> usize {
        let consensus = self.consensus();
        self.motifs
            .iter()
            .map(|m| hamming(m.as_slice(), consensus.as_slice()))
            .sum()
    }

    /// Get the textual representation of each motif.
    pub fn to_strings(&self) -> Vec<String> {
        self.motifs.iter().map(|m| m.to_string()).collect()
    }
}

impl<A: Alphabet> AsRef<[EncodedSequence<A>]> for MotifSet<A> {
    fn as_ref(&self) -> &[EncodedSequence<A>] {
        &self.motifs
    }
}

impl<A: Alphabet> Display for MotifSet<A> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for motif in self.motifs.iter() {
            writeln!(f, "{}", motif)?;
        }
        Ok(())
    }
}

impl<A: Alphabet> Index<usize> for MotifSet<A> {
    type Output = EncodedSequence<A>;
    fn index(&self, index: usize) -> &Self::Output {
        &self.motifs[index]
    }
}

impl<'a, A: Alphabet> IntoIterator for &'a MotifSet<A> {
    type Item = &'a EncodedSequence<A>;
    type IntoIter = std::slice::Iter<'a, EncodedSequence<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.motifs.iter()
    }
}

/// Score a motif set, see [`MotifSet::score`].
pub fn score<A: Alphabet>(motifs: &MotifSet<A>) -> usize {
    motifs.score()
}

/// Select the most probable window of every sequence under `profile`.
pub fn most_probable_motifs<A: Alphabet>(
    profile: &Profile<A>,
    dna: &SequenceSet<A>,
) -> Result<MotifSet<A>, Error> {
    let k = profile.len();
    dna.iter()
        .map(|seq| {
            profile
                .most_probable(seq)
                .map(|start| seq.slice(start..start + k))
        })
        .collect::<Result<Vec<_>, _>>()
        .and_then(MotifSet::new)
}

/// Sum, over all sequences, the smallest distance from `kmer` to any window.
pub fn pattern_distance<A: Alphabet>(
    kmer: &EncodedSequence<A>,
    dna: &SequenceSet<A>,
) -> Result<usize, Error> {
    dna.check_motif_length(kmer.len())?;
    Ok(dna
        .iter()
        .map(|seq| {
            seq.windows(kmer.len())
                .map(|w| hamming(w, kmer.as_slice()))
                .min()
                .unwrap_or(0)
        })
        .sum())
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::pwm::build_profile;

    #[test]
    fn test_hamming() {
        assert_eq!(hamming(&b"ACGTACGT"[..], &b"ACGTACGT"[..]), 0);
        assert_eq!(hamming(&b"AAAA"[..], &b"AAAT"[..]), 1);
        assert_eq!(hamming(&b"AC"[..], &b"ACGT"[..]), 0);
        assert_eq!(hamming(&b"ACGT"[..], &b"TGCA"[..]), 4);
        assert_eq!(hamming(&b""[..], &b"ACGT"[..]), 0);
    }

    #[test]
    fn test_consensus_tie_break() {
        let motifs = MotifSet::<Dna>::encode(["A", "C"]).unwrap();
        assert_eq!(motifs.consensus().to_string(), "A");
        assert_eq!(motifs.score(), 1);

        let motifs = MotifSet::<Dna>::encode(["C", "C", "G"]).unwrap();
        assert_eq!(motifs.consensus().to_string(), "C");
        assert_eq!(motifs.score(), 1);

        let motifs = MotifSet::<Dna>::encode(["G", "T"]).unwrap();
        assert_eq!(motifs.consensus().to_string(), "G");
        let motifs = MotifSet::<Dna>::encode(["T", "C", "G", "T", "C"]).unwrap();
        assert_eq!(motifs.consensus().to_string(), "C");
    }

    #[test]
    fn test_score() {
        let motifs = MotifSet::<Dna>::encode(["TCGGGGGTTTTT", "CCGGTGACTTAC", "ACGGGGATTTTC"])
            .unwrap();
        assert_eq!(motifs.consensus().to_string(), "ACGGGGATTTTC");
        assert_eq!(score(&motifs), 7);

        let motifs = MotifSet::<Dna>::encode(["GATTACA", "GATTACA"]).unwrap();
        assert_eq!(motifs.score(), 0);
    }

    #[test]
    fn test_motif_set_errors() {
        assert_eq!(
            MotifSet::<Dna>::encode(Vec::<String>::new()).unwrap_err(),
            Error::EmptyMotifSet
        );
        assert!(matches!(
            MotifSet::<Dna>::encode(["ACG", "AC"]),
            Err(Error::InconsistentLength { index: 1, .. })
        ));
    }

    #[test]
    fn test_replace() {
        let motifs = MotifSet::<Dna>::encode(["AAA", "CCC", "GGG"]).unwrap();
        let replaced = motifs
            .replace(1, EncodedSequence::encode("TTT").unwrap())
            .unwrap();
        assert_eq!(motifs.to_strings(), ["AAA", "CCC", "GGG"]);
        assert_eq!(replaced.to_strings(), ["AAA", "TTT", "GGG"]);
        assert!(motifs
            .replace(0, EncodedSequence::encode("TT").unwrap())
            .is_err());

        let held = motifs.holdout(1).map(|m| m.to_string()).collect::<Vec<_>>();
        assert_eq!(held, ["AAA", "GGG"]);
    }

    #[test]
    fn test_most_probable_motifs() {
        let dna = SequenceSet::<Dna>::encode(["TTACGTT", "ACGTTTT", "TTTTACG"]).unwrap();
        let seeds = MotifSet::<Dna>::encode(["ACG", "ACG"]).unwrap();
        let profile = build_profile::<Dna, _>(&seeds).unwrap();
        let motifs = most_probable_motifs(&profile, &dna).unwrap();
        assert_eq!(motifs.to_strings(), ["ACG", "ACG", "ACG"]);
    }

    #[test]
    fn test_pattern_distance() {
        let dna = SequenceSet::<Dna>::encode([
            "TTACCTTAAC",
            "GATATCTGTC",
            "ACGGCGTTCG",
            "CCCTAAAGAG",
            "CGTCAGAGGT",
        ])
        .unwrap();
        let kmer = EncodedSequence::<Dna>::encode("AAA").unwrap();
        assert_eq!(pattern_distance(&kmer, &dna).unwrap(), 5);

        let long = EncodedSequence::<Dna>::encode("AAAAAAAAAAA").unwrap();
        assert!(pattern_distance(&long, &dna).is_err());
    }
}
