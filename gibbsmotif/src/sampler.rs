//! Gibbs sampling of motif occurences in a collection of sequences.

use log::debug;
use log::trace;
use rand::Rng;
use rand_distr::Distribution;
use rand_distr::Standard;
use rand_distr::Uniform;

use super::abc::Alphabet;
use super::abc::Dna;
use super::abc::Pseudocounts;
use super::err::Error;
use super::motif::MotifSet;
use super::pwm::CountMatrix;
use super::pwm::Profile;
use super::seq::EncodedSequence;
use super::seq::SequenceSet;

// --- WindowDistribution ------------------------------------------------------

/// A discrete distribution over the windows of a sequence.
///
/// The distribution is stored as the cumulative sums of the normalized
/// window likelihoods.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDistribution {
    cumulative: Vec<f64>,
}

impl WindowDistribution {
    /// Create a new distribution from unnormalized window likelihoods.
    ///
    /// Fails with [`Error::DegenerateLikelihoods`] if the likelihoods do
    /// not sum to a positive finite number.
    pub fn new(likelihoods: &[f64]) -> Result<Self, Error> {
        let total: f64 = likelihoods.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(Error::DegenerateLikelihoods);
        }
        let mut acc = 0.0;
        let cumulative = likelihoods
            .iter()
            .map(|&p| {
                acc += p / total;
                acc
            })
            .collect();
        Ok(Self { cumulative })
    }

    /// Create a new distribution from window log-likelihoods.
    ///
    /// The weights are shifted by their maximum before exponentiation, so
    /// that very small likelihoods do not underflow. Windows with a
    /// log-likelihood of negative infinity get a zero probability.
    pub fn from_log_likelihoods(log_likelihoods: &[f64]) -> Result<Self, Error> {
        let max = log_likelihoods
            .iter()
            .fold(f64::NEG_INFINITY, |m, &l| m.max(l));
        if !max.is_finite() || log_likelihoods.iter().any(|l| l.is_nan()) {
            return Err(Error::DegenerateLikelihoods);
        }
        let weights = log_likelihoods
            .iter()
            .map(|&l| (l - max).exp())
            .collect::<Vec<f64>>();
        Self::new(&weights)
    }

    /// The number of windows in the distribution.
    #[inline]
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    /// Always `false`, a distribution has at least one window.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// The cumulative probabilities of the windows.
    #[inline]
    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    /// The normalized probability of window `i`.
    pub fn probability(&self, i: usize) -> f64 {
        match i {
            0 => self.cumulative[0],
            _ => self.cumulative[i] - self.cumulative[i - 1],
        }
    }

    /// Select the window for a value `v` drawn in `[0, 1)`.
    ///
    /// Returns the first window whose cumulative probability is strictly
    /// greater than `v`. If rounding left the final cumulative value at
    /// or below `v`, the last window is returned.
    pub fn select(&self, v: f64) -> usize {
        let i = self.cumulative.partition_point(|&c| c <= v);
        i.min(self.cumulative.len() - 1)
    }
}

impl Distribution<usize> for WindowDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let v: f64 = rng.sample(Standard);
        self.select(v)
    }
}

/// Draw the offset of a window of `sequence` proportionally to its likelihood.
pub fn sample_offset<A, R>(
    profile: &Profile<A>,
    sequence: &EncodedSequence<A>,
    rng: &mut R,
) -> Result<usize, Error>
where
    A: Alphabet,
    R: Rng + ?Sized,
{
    let log_likelihoods = profile.log_likelihoods(sequence)?;
    let dist = WindowDistribution::from_log_likelihoods(&log_likelihoods)?;
    Ok(dist.sample(rng))
}

/// Draw a window of `sequence` proportionally to its likelihood.
pub fn sample_replacement<A, R>(
    profile: &Profile<A>,
    sequence: &EncodedSequence<A>,
    rng: &mut R,
) -> Result<EncodedSequence<A>, Error>
where
    A: Alphabet,
    R: Rng + ?Sized,
{
    let start = sample_offset(profile, sequence, rng)?;
    Ok(sequence.slice(start..start + profile.len()))
}

// --- Sampler -----------------------------------------------------------------

/// A single run of the Gibbs motif sampler.
///
/// The sampler is an iterator yielding one [`GibbsIteration`] per step.
/// A run of `N` iterations performs `N - 1` steps after the random
/// initialization.
#[derive(Debug)]
pub struct Sampler<'a, R: Rng, A: Alphabet = Dna> {
    /// A reference to the sequences being searched.
    sequences: &'a SequenceSet<A>,
    /// The random number generator.
    rng: R,

    // -- Parameters ----------------------------
    /// The width of the motif currently being built.
    width: usize,
    /// The total number of iterations of the run.
    iterations: usize,
    /// The pseudocounts used to build profiles.
    pseudocounts: Pseudocounts<A>,

    // -- Internal data -------------------------
    /// The start positions of the motif in each sequence.
    starts: Vec<usize>,
    /// The current motif set.
    motifs: MotifSet<A>,
    /// The best motif set seen so far.
    best: MotifSet<A>,
    /// The start positions of the best motif set.
    best_starts: Vec<usize>,
    /// The score of the best motif set.
    best_score: usize,
    /// The score of the random initial motif set.
    initial_score: usize,
    /// The number of steps performed.
    step: usize,
}

impl<'a, R, A> Sampler<'a, R, A>
where
    R: Rng,
    A: Alphabet,
{
    /// Initialize a new run with random start positions.
    pub fn new(
        sequences: &'a SequenceSet<A>,
        width: usize,
        iterations: usize,
        mut rng: R,
    ) -> Result<Self, Error> {
        sequences.check_motif_length(width)?;
        if iterations == 0 {
            return Err(Error::InvalidIterations(iterations));
        }

        // select initial positions in each sequence randomly
        let positions = Uniform::new(0, sequences.sequence_length() - width + 1);
        let starts = sequences
            .iter()
            .map(|_| positions.sample(&mut rng))
            .collect::<Vec<usize>>();
        let motifs = MotifSet::new(
            sequences
                .iter()
                .zip(starts.iter())
                .map(|(seq, &start)| seq.slice(start..start + width))
                .collect(),
        )?;

        let score = motifs.score();
        debug!(
            "starting run with t={} k={} N={} (initial score {})",
            sequences.len(),
            width,
            iterations,
            score
        );
        Ok(Self {
            sequences,
            rng,
            width,
            iterations,
            pseudocounts: Pseudocounts::laplace(),
            best: motifs.clone(),
            best_starts: starts.clone(),
            best_score: score,
            initial_score: score,
            starts,
            motifs,
            step: 0,
        })
    }

    /// The current motif set.
    #[inline]
    pub fn motifs(&self) -> &MotifSet<A> {
        &self.motifs
    }

    /// The start positions of the current motif set.
    #[inline]
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    /// The best motif set seen so far.
    #[inline]
    pub fn best(&self) -> &MotifSet<A> {
        &self.best
    }

    /// The score of the best motif set seen so far.
    #[inline]
    pub fn best_score(&self) -> usize {
        self.best_score
    }

    /// The number of steps left before the run is complete.
    #[inline]
    pub fn remaining(&self) -> usize {
        (self.iterations - 1).saturating_sub(self.step)
    }

    /// Perform a single sampling step.
    ///
    /// One sequence is held out, a profile is built from the motifs of
    /// all the other sequences, and a new window of the held out
    /// sequence is drawn from that profile to replace its motif.
    pub fn step(&mut self) -> Result<GibbsIteration, Error> {
        let sequences = self.sequences;

        // step 1: sampling
        // select the holdout sequence
        let z = Uniform::new(0, sequences.len()).sample(&mut self.rng);
        // build the profile from all motifs but the holdout one
        let counts = CountMatrix::with_width(self.width, self.motifs.holdout(z))?;
        let profile = counts.to_freq(self.pseudocounts.clone());

        // step 2: update
        // select new start position for sequence Z
        let seq = &sequences[z];
        let start = sample_offset(&profile, seq, &mut self.rng)?;
        self.motifs = self
            .motifs
            .replace(z, seq.slice(start..start + self.width))?;
        self.starts[z] = start;

        // keep a snapshot of the motifs on strict improvement
        let score = self.motifs.score();
        if score < self.best_score {
            trace!(
                "step {}: score improved from {} to {}",
                self.step,
                self.best_score,
                score
            );
            self.best = self.motifs.clone();
            self.best_starts = self.starts.clone();
            self.best_score = score;
        }

        self.step += 1;
        Ok(GibbsIteration {
            z,
            start,
            score,
            best_score: self.best_score,
        })
    }

    /// Run all remaining steps and return the best motif set.
    pub fn finish(mut self) -> Result<RunResult<A>, Error> {
        for iteration in self.by_ref() {
            iteration?;
        }
        debug!(
            "finished run after {} steps (initial score {}, best score {})",
            self.step, self.initial_score, self.best_score
        );
        Ok(RunResult {
            motifs: self.best,
            starts: self.best_starts,
            score: self.best_score,
            initial_score: self.initial_score,
        })
    }
}

impl<R, A> Iterator for Sampler<'_, R, A>
where
    R: Rng,
    A: Alphabet,
{
    type Item = Result<GibbsIteration, Error>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining() == 0 {
            None
        } else {
            Some(self.step())
        }
    }
}

/// The outcome of a single sampling step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GibbsIteration {
    /// The index of the hold-out sequence.
    pub z: usize,
    /// The start position of the window drawn for the hold-out sequence.
    pub start: usize,
    /// The score of the motif set after the step.
    pub score: usize,
    /// The best score seen so far in the run.
    pub best_score: usize,
}

/// The best motif set found by a sampler run.
#[derive(Debug, Clone)]
pub struct RunResult<A: Alphabet = Dna> {
    motifs: MotifSet<A>,
    starts: Vec<usize>,
    score: usize,
    initial_score: usize,
}

impl<A: Alphabet> RunResult<A> {
    /// The best motif set of the run.
    #[inline]
    pub fn motifs(&self) -> &MotifSet<A> {
        &self.motifs
    }

    /// Extract the best motif set of the run.
    #[inline]
    pub fn into_motifs(self) -> MotifSet<A> {
        self.motifs
    }

    /// The start position of each motif in its sequence.
    #[inline]
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    /// The score of the best motif set.
    #[inline]
    pub fn score(&self) -> usize {
        self.score
    }

    /// The score of the random motif set the run started from.
    #[inline]
    pub fn initial_score(&self) -> usize {
        self.initial_score
    }
}

/// Run the Gibbs sampler once for `n` iterations with motifs of width `k`.
pub fn gibbs_sampler_run<A, R>(
    dna: &SequenceSet<A>,
    k: usize,
    n: usize,
    rng: &mut R,
) -> Result<MotifSet<A>, Error>
where
    A: Alphabet,
    R: Rng + ?Sized,
{
    Sampler::new(dna, k, n, rng)?
        .finish()
        .map(RunResult::into_motifs)
}
