//! Count matrices and position-frequency profiles.

use super::abc::Alphabet;
use super::abc::Dna;
use super::abc::Pseudocounts;
use super::abc::Symbol;
use super::dense::DenseMatrix;
use super::err::Error;
use super::seq::EncodedSequence;

// --- CountMatrix -------------------------------------------------------------

/// A matrix storing symbol occurences at each position.
#[derive(Clone, Debug)]
pub struct CountMatrix<A: Alphabet = Dna> {
    /// The alphabet of the count matrix.
    alphabet: std::marker::PhantomData<A>,
    /// The actual counts for each position of the motif.
    data: DenseMatrix<u32, A::K>,
    /// The number of sequences from which this count matrix was obtained.
    n: u32,
}

impl<A: Alphabet> CountMatrix<A> {
    /// Create a new count matrix with no occurences for a motif of width `k`.
    pub fn new(k: usize) -> Self {
        Self {
            alphabet: std::marker::PhantomData,
            data: DenseMatrix::new(k),
            n: 0,
        }
    }

    /// Create a new count matrix from the given sequences.
    ///
    /// The width of the matrix is the length of the first sequence, and
    /// all following sequences must have the same length.
    pub fn from_sequences<I>(sequences: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        <I as IntoIterator>::Item: AsRef<EncodedSequence<A>>,
    {
        let mut it = sequences.into_iter().peekable();
        let k = match it.peek() {
            Some(seq) => AsRef::<EncodedSequence<A>>::as_ref(seq).len(),
            None => return Err(Error::EmptyMotifSet),
        };
        Self::with_width(k, it)
    }

    /// Create a new count matrix of width `k` from the given sequences.
    ///
    /// Unlike [`CountMatrix::from_sequences`], an empty iterator gives
    /// a matrix with zero counts at every position.
    pub fn with_width<I>(k: usize, sequences: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        <I as IntoIterator>::Item: AsRef<EncodedSequence<A>>,
    {
        let mut counts = Self::new(k);
        for (index, seq) in sequences.into_iter().enumerate() {
            let seq = seq.as_ref();
            if seq.len() != k {
                return Err(Error::InconsistentLength {
                    index,
                    expected: k,
                    found: seq.len(),
                });
            }
            for (i, x) in seq.iter().enumerate() {
                counts.data[i][x.as_index()] += 1;
            }
            counts.n += 1;
        }
        Ok(counts)
    }

    /// Build a probability matrix from this count matrix using pseudo-counts.
    pub fn to_freq<P>(&self, pseudo: P) -> Profile<A>
    where
        P: Into<Pseudocounts<A>>,
    {
        let p = pseudo.into();
        let mut probas = DenseMatrix::new(self.data.rows());
        for (src, dst) in self.data.iter().zip(probas.iter_mut()) {
            for (j, &x) in src.iter().enumerate() {
                dst[j] = x as f64 + p.counts()[j];
            }
            let s: f64 = dst.iter().sum();
            if s > 0.0 {
                for x in dst.iter_mut() {
                    *x /= s;
                }
            }
        }
        Profile {
            alphabet: std::marker::PhantomData,
            data: probas,
        }
    }

    /// The width of the motif counted in this matrix.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.rows()
    }

    /// Check whether the matrix has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.rows() == 0
    }

    /// The number of sequences counted in this matrix.
    #[inline]
    pub fn n(&self) -> u32 {
        self.n
    }

    /// The raw counts from the count matrix.
    #[inline]
    pub fn counts(&self) -> &DenseMatrix<u32, A::K> {
        &self.data
    }
}

impl<A: Alphabet> AsRef<DenseMatrix<u32, A::K>> for CountMatrix<A> {
    fn as_ref(&self) -> &DenseMatrix<u32, A::K> {
        &self.data
    }
}

impl<A: Alphabet> FromIterator<EncodedSequence<A>> for Result<CountMatrix<A>, Error> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = EncodedSequence<A>>,
    {
        CountMatrix::from_sequences(iter)
    }
}

// --- Profile -----------------------------------------------------------------

/// A matrix storing symbol probabilities at each position of a motif.
///
/// Each row of the matrix corresponds to a motif position and sums to one,
/// columns follow the order of [`Alphabet::symbols`].
#[derive(Clone, Debug)]
pub struct Profile<A: Alphabet = Dna> {
    alphabet: std::marker::PhantomData<A>,
    data: DenseMatrix<f64, A::K>,
}

impl<A: Alphabet> Profile<A> {
    /// The length of the motif encoded in this profile.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.rows()
    }

    /// Check whether the profile has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.rows() == 0
    }

    /// The probabilities of the profile.
    #[inline]
    pub fn matrix(&self) -> &DenseMatrix<f64, A::K> {
        &self.data
    }

    /// The probability of `symbol` at motif position `j`.
    #[inline]
    pub fn probability(&self, j: usize, symbol: A::Symbol) -> f64 {
        self.data[j][symbol.as_index()]
    }

    /// Compute the likelihood of a window under this profile.
    ///
    /// Only the overlap between the window and the profile is considered.
    pub fn likelihood(&self, window: &[A::Symbol]) -> f64 {
        window
            .iter()
            .zip(self.data.iter())
            .map(|(s, row)| row[s.as_index()])
            .product()
    }

    /// Compute the natural logarithm of the likelihood of a window.
    ///
    /// Unlike [`Profile::likelihood`], the result does not underflow for
    /// long motifs. Zero probabilities give negative infinity.
    pub fn log_likelihood(&self, window: &[A::Symbol]) -> f64 {
        window
            .iter()
            .zip(self.data.iter())
            .map(|(s, row)| row[s.as_index()].ln())
            .sum()
    }

    fn check_sequence(&self, sequence: &EncodedSequence<A>) -> Result<usize, Error> {
        let k = self.len();
        if k == 0 {
            return Err(Error::InvalidMotifLength(k));
        }
        if k > sequence.len() {
            return Err(Error::MotifTooLong {
                k,
                length: sequence.len(),
            });
        }
        Ok(k)
    }

    /// Compute the likelihood of every window of `sequence` under this profile.
    pub fn likelihoods(&self, sequence: &EncodedSequence<A>) -> Result<Vec<f64>, Error> {
        let k = self.check_sequence(sequence)?;
        Ok(sequence.windows(k).map(|w| self.likelihood(w)).collect())
    }

    /// Compute the log-likelihood of every window of `sequence`.
    pub fn log_likelihoods(&self, sequence: &EncodedSequence<A>) -> Result<Vec<f64>, Error> {
        let k = self.check_sequence(sequence)?;
        Ok(sequence.windows(k).map(|w| self.log_likelihood(w)).collect())
    }

    /// Find the offset of the most probable window of `sequence`.
    ///
    /// When several windows share the highest likelihood, the leftmost
    /// one is returned.
    pub fn most_probable(&self, sequence: &EncodedSequence<A>) -> Result<usize, Error> {
        let likelihoods = self.log_likelihoods(sequence)?;
        let mut best = 0;
        for (i, &p) in likelihoods.iter().enumerate() {
            if p > likelihoods[best] {
                best = i;
            }
        }
        Ok(best)
    }
}

impl<A: Alphabet> AsRef<DenseMatrix<f64, A::K>> for Profile<A> {
    fn as_ref(&self) -> &DenseMatrix<f64, A::K> {
        &self.data
    }
}

/// Build a profile from a set of motifs using Laplace smoothing.
///
/// Every count is incremented by one before normalization, so that no
/// symbol ever gets a zero probability.
pub fn build_profile<A, I>(motifs: I) -> Result<Profile<A>, Error>
where
    A: Alphabet,
    I: IntoIterator,
    <I as IntoIterator>::Item: AsRef<EncodedSequence<A>>,
{
    CountMatrix::from_sequences(motifs).map(|counts| counts.to_freq(Pseudocounts::laplace()))
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::abc::Nucleotide;

    fn encode(motifs: &[&str]) -> Vec<EncodedSequence<Dna>> {
        motifs
            .iter()
            .map(|m| EncodedSequence::encode(m).unwrap())
            .collect()
    }

    #[test]
    fn test_count_matrix() {
        let motifs = encode(&["ACGT", "ACGA", "TCGA"]);
        let counts = CountMatrix::<Dna>::from_sequences(&motifs).unwrap();
        assert_eq!(counts.n(), 3);
        assert_eq!(counts.len(), 4);
        assert_eq!(&counts.counts()[0], &[2, 0, 0, 1]);
        assert_eq!(&counts.counts()[1], &[0, 3, 0, 0]);
        assert_eq!(&counts.counts()[3], &[2, 0, 0, 1]);
    }

    #[test]
    fn test_count_matrix_errors() {
        let motifs = encode(&["ACGT", "ACG"]);
        assert!(matches!(
            CountMatrix::<Dna>::from_sequences(&motifs),
            Err(Error::InconsistentLength { index: 1, .. })
        ));
        let empty: Vec<EncodedSequence<Dna>> = Vec::new();
        assert!(matches!(
            CountMatrix::<Dna>::from_sequences(&empty),
            Err(Error::EmptyMotifSet)
        ));
        let counts = CountMatrix::<Dna>::with_width(3, &empty).unwrap();
        assert_eq!(counts.len(), 3);
        assert_eq!(counts.n(), 0);
    }

    #[test]
    fn test_build_profile() {
        let motifs = encode(&["ACGT", "ACGA", "TCGA"]);
        let profile = build_profile::<Dna, _>(&motifs).unwrap();
        assert_eq!(profile.len(), 4);
        // (2+1) / (3+4)
        assert!((profile.probability(0, Nucleotide::A) - 3.0 / 7.0).abs() < 1e-12);
        assert!((profile.probability(0, Nucleotide::C) - 1.0 / 7.0).abs() < 1e-12);
        assert!((profile.probability(1, Nucleotide::C) - 4.0 / 7.0).abs() < 1e-12);
        for row in profile.matrix().iter() {
            let sum: f64 = row.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
            assert!(row.iter().all(|&p| p > 0.0));
        }
    }

    #[test]
    fn test_uniform_profile() {
        let empty: Vec<EncodedSequence<Dna>> = Vec::new();
        let profile = CountMatrix::<Dna>::with_width(2, &empty)
            .unwrap()
            .to_freq(Pseudocounts::laplace());
        for row in profile.matrix().iter() {
            assert_eq!(row, &[0.25, 0.25, 0.25, 0.25]);
        }
    }

    #[test]
    fn test_likelihoods() {
        let motifs = encode(&["AC", "AC"]);
        let profile = build_profile::<Dna, _>(&motifs).unwrap();
        let seq = EncodedSequence::<Dna>::encode("ACGAC").unwrap();
        let likelihoods = profile.likelihoods(&seq).unwrap();
        assert_eq!(likelihoods.len(), 4);
        // AC: (3/6) * (3/6)
        assert!((likelihoods[0] - 0.25).abs() < 1e-12);
        // CG: (1/6) * (1/6)
        assert!((likelihoods[1] - 1.0 / 36.0).abs() < 1e-12);
        assert_eq!(likelihoods[0], likelihoods[3]);
        assert_eq!(profile.most_probable(&seq).unwrap(), 0);

        let short = EncodedSequence::<Dna>::encode("A").unwrap();
        assert!(matches!(
            profile.likelihoods(&short),
            Err(Error::MotifTooLong { k: 2, length: 1 })
        ));
        assert!(matches!(
            profile.log_likelihoods(&short),
            Err(Error::MotifTooLong { k: 2, length: 1 })
        ));

        let logs = profile.log_likelihoods(&seq).unwrap();
        assert!((logs[0] - 0.25f64.ln()).abs() < 1e-12);
        assert!((logs[1] - (1.0f64 / 36.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_log_likelihoods_long_motif() {
        // a product of 1000 probabilities of 0.4 or less underflows to zero
        let text = "ACGT".repeat(250);
        let motifs = encode(&[text.as_str()]);
        let profile = build_profile::<Dna, _>(&motifs).unwrap();
        let seq = EncodedSequence::<Dna>::encode(&format!("{}TT", text)).unwrap();
        assert!(profile.likelihoods(&seq).unwrap().iter().all(|&p| p == 0.0));

        let logs = profile.log_likelihoods(&seq).unwrap();
        assert_eq!(logs.len(), 3);
        assert!(logs.iter().all(|l| l.is_finite()));
        assert!((logs[0] - 1000.0 * (2.0f64 / 5.0).ln()).abs() < 1e-6);
        assert_eq!(profile.most_probable(&seq).unwrap(), 0);
    }
}
