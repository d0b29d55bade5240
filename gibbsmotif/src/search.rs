//! Multi-seed motif search over independent sampler runs.

use log::debug;
use log::info;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::abc::Alphabet;
use super::abc::Dna;
use super::err::Error;
use super::motif::MotifSet;
use super::sampler::RunResult;
use super::sampler::Sampler;
use super::seq::SequenceSet;

/// The default number of iterations of a single run.
pub const DEFAULT_ITERATIONS: usize = 1000;
/// The default number of independent runs.
pub const DEFAULT_SEEDS: usize = 20;

// --- MotifSearch -------------------------------------------------------------

/// A configurable multi-seed Gibbs motif search.
///
/// Every run is seeded from a `u64` drawn from the caller's generator
/// before any run starts, so the result only depends on that generator
/// and not on how the runs are scheduled.
///
/// ```
/// # use rand::rngs::StdRng;
/// # use rand::SeedableRng;
/// # use gibbsmotif::SequenceSet;
/// # use gibbsmotif::search::MotifSearch;
/// let dna: SequenceSet = SequenceSet::encode(["GGACTTCAGGCCTA", "GGTCTGAGGCAATC"]).unwrap();
/// let mut rng = StdRng::seed_from_u64(42);
/// let result = MotifSearch::new(4)
///     .iterations(100)
///     .seeds(5)
///     .run(&dna, &mut rng)
///     .unwrap();
/// assert_eq!(result.motifs().len(), 2);
/// assert_eq!(result.scores().len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotifSearch {
    width: usize,
    iterations: usize,
    seeds: usize,
    threads: usize,
}

impl MotifSearch {
    /// Create a new search for motifs of width `k` with default parameters.
    pub fn new(k: usize) -> Self {
        Self {
            width: k,
            iterations: DEFAULT_ITERATIONS,
            seeds: DEFAULT_SEEDS,
            threads: 0,
        }
    }

    /// Set the number of iterations of each run.
    pub fn iterations(&mut self, n: usize) -> &mut Self {
        self.iterations = n;
        self
    }

    /// Set the number of independent runs.
    pub fn seeds(&mut self, n: usize) -> &mut Self {
        self.seeds = n;
        self
    }

    /// Set the number of threads used to execute the runs.
    ///
    /// `0` uses the global thread pool. Ignored when the `parallel`
    /// feature is disabled.
    pub fn threads(&mut self, n: usize) -> &mut Self {
        self.threads = n;
        self
    }

    /// The width of the motifs being searched.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    fn check<A: Alphabet>(&self, dna: &SequenceSet<A>) -> Result<(), Error> {
        dna.check_motif_length(self.width)?;
        if self.iterations == 0 {
            return Err(Error::InvalidIterations(self.iterations));
        }
        if self.seeds == 0 {
            return Err(Error::InvalidSeedCount(self.seeds));
        }
        Ok(())
    }

    /// Run the search and return the best motif set over all runs.
    pub fn run<A, R>(&self, dna: &SequenceSet<A>, rng: &mut R) -> Result<SearchResult<A>, Error>
    where
        A: Alphabet,
        R: Rng + ?Sized,
    {
        self.run_with(dna, rng, |_, _| ())
    }

    /// Run the search, calling `callback` with the index and result of
    /// every run once it completes.
    ///
    /// Runs may complete in any order when executed in parallel.
    pub fn run_with<A, R, F>(
        &self,
        dna: &SequenceSet<A>,
        rng: &mut R,
        callback: F,
    ) -> Result<SearchResult<A>, Error>
    where
        A: Alphabet,
        R: Rng + ?Sized,
        F: Fn(usize, &RunResult<A>) + Sync,
    {
        self.check(dna)?;

        let seeds = (0..self.seeds).map(|_| rng.gen()).collect::<Vec<u64>>();
        let mut runs = self.run_all(dna, &seeds, &callback)?;

        // keep the earliest run among the ones with the lowest score
        let mut best = 0;
        for (i, run) in runs.iter().enumerate() {
            if run.score() < runs[best].score() {
                best = i;
            }
        }
        let scores = runs.iter().map(RunResult::score).collect::<Vec<_>>();
        info!(
            "selected run {} of {} with score {}",
            best,
            runs.len(),
            scores[best]
        );

        let result = runs.swap_remove(best);
        Ok(SearchResult {
            score: result.score(),
            motifs: result.into_motifs(),
            run: best,
            scores,
        })
    }

    fn run_one<A, F>(
        &self,
        dna: &SequenceSet<A>,
        index: usize,
        seed: u64,
        callback: &F,
    ) -> Result<RunResult<A>, Error>
    where
        A: Alphabet,
        F: Fn(usize, &RunResult<A>) + Sync,
    {
        let rng = StdRng::seed_from_u64(seed);
        let result = Sampler::new(dna, self.width, self.iterations, rng)?.finish()?;
        debug!(
            "run {} finished with score {} (initial score {})",
            index,
            result.score(),
            result.initial_score()
        );
        callback(index, &result);
        Ok(result)
    }

    #[cfg(feature = "parallel")]
    fn run_all<A, F>(
        &self,
        dna: &SequenceSet<A>,
        seeds: &[u64],
        callback: &F,
    ) -> Result<Vec<RunResult<A>>, Error>
    where
        A: Alphabet,
        F: Fn(usize, &RunResult<A>) + Sync,
    {
        let job = || {
            seeds
                .par_iter()
                .enumerate()
                .map(|(i, &seed)| self.run_one(dna, i, seed, callback))
                .collect::<Result<Vec<_>, _>>()
        };
        if self.threads == 0 {
            job()
        } else {
            rayon::ThreadPoolBuilder::new()
                .num_threads(self.threads)
                .build()
                .map_err(|e| Error::ThreadPool(e.to_string()))?
                .install(job)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run_all<A, F>(
        &self,
        dna: &SequenceSet<A>,
        seeds: &[u64],
        callback: &F,
    ) -> Result<Vec<RunResult<A>>, Error>
    where
        A: Alphabet,
        F: Fn(usize, &RunResult<A>) + Sync,
    {
        seeds
            .iter()
            .enumerate()
            .map(|(i, &seed)| self.run_one(dna, i, seed, callback))
            .collect()
    }
}

// --- SearchResult ------------------------------------------------------------

/// The best motif set found by a [`MotifSearch`].
#[derive(Debug, Clone)]
pub struct SearchResult<A: Alphabet = Dna> {
    motifs: MotifSet<A>,
    score: usize,
    run: usize,
    scores: Vec<usize>,
}

impl<A: Alphabet> SearchResult<A> {
    /// The best motif set.
    #[inline]
    pub fn motifs(&self) -> &MotifSet<A> {
        &self.motifs
    }

    /// Extract the best motif set.
    #[inline]
    pub fn into_motifs(self) -> MotifSet<A> {
        self.motifs
    }

    /// The score of the best motif set.
    #[inline]
    pub fn score(&self) -> usize {
        self.score
    }

    /// The index of the run the best motif set comes from.
    #[inline]
    pub fn run(&self) -> usize {
        self.run
    }

    /// The best score of every run, in run order.
    #[inline]
    pub fn scores(&self) -> &[usize] {
        &self.scores
    }
}

/// Run the Gibbs sampler `num_seeds` times and keep the best motif set.
pub fn multi_seed_search<A, R>(
    dna: &SequenceSet<A>,
    num_seeds: usize,
    k: usize,
    n: usize,
    rng: &mut R,
) -> Result<MotifSet<A>, Error>
where
    A: Alphabet,
    R: Rng + ?Sized,
{
    MotifSearch::new(k)
        .iterations(n)
        .seeds(num_seeds)
        .run(dna, rng)
        .map(SearchResult::into_motifs)
}

#[cfg(test)]
mod test {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use super::*;

    fn dna() -> SequenceSet<Dna> {
        SequenceSet::encode([
            "CGCCCCTCTCGGGGGTGTTCAGTAAACGGCCA",
            "GGGCGAGGTATGTGTAAGTGCCAAGGTGCCAG",
            "TAGTACCGAGACCGAAAGAAGTATACAGGCGT",
            "TAGATCAAGTTTCAGGTGCACGTCGGTGAACC",
            "AATCCACCAGCTCCACGTGCAATGTTGGCCTA",
        ])
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let search = MotifSearch::new(11);
        assert_eq!(search.width(), 11);
        assert_eq!(search.iterations, DEFAULT_ITERATIONS);
        assert_eq!(search.seeds, DEFAULT_SEEDS);
        assert_eq!(search.threads, 0);
    }

    #[test]
    fn test_preconditions() {
        let dna = dna();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            MotifSearch::new(8).seeds(0).run(&dna, &mut rng).unwrap_err(),
            Error::InvalidSeedCount(0)
        );
        assert_eq!(
            MotifSearch::new(8)
                .iterations(0)
                .run(&dna, &mut rng)
                .unwrap_err(),
            Error::InvalidIterations(0)
        );
        assert_eq!(
            MotifSearch::new(0).run(&dna, &mut rng).unwrap_err(),
            Error::InvalidMotifLength(0)
        );
        assert_eq!(
            MotifSearch::new(33).run(&dna, &mut rng).unwrap_err(),
            Error::MotifTooLong { k: 33, length: 32 }
        );
    }

    #[test]
    fn test_best_of_all_runs() {
        let dna = dna();
        let mut rng = StdRng::seed_from_u64(42);
        let result = MotifSearch::new(8)
            .iterations(200)
            .seeds(10)
            .run(&dna, &mut rng)
            .unwrap();
        assert_eq!(result.scores().len(), 10);
        assert_eq!(result.score(), result.motifs().score());
        assert_eq!(result.score(), result.scores()[result.run()]);
        for (i, &score) in result.scores().iter().enumerate() {
            assert!(result.score() <= score);
            if i < result.run() {
                assert!(score > result.score());
            }
        }
    }

    #[test]
    fn test_callback() {
        let dna = dna();
        let counter = AtomicUsize::new(0);
        let mut rng = StdRng::seed_from_u64(1);
        MotifSearch::new(6)
            .iterations(50)
            .seeds(7)
            .run_with(&dna, &mut rng, |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn test_thread_count_does_not_change_result() {
        let dna = dna();
        let mut search = MotifSearch::new(8);
        search.iterations(100).seeds(8);

        let r1 = search
            .threads(1)
            .run(&dna, &mut StdRng::seed_from_u64(5))
            .unwrap();
        let r4 = search
            .threads(4)
            .run(&dna, &mut StdRng::seed_from_u64(5))
            .unwrap();
        let r0 = search
            .threads(0)
            .run(&dna, &mut StdRng::seed_from_u64(5))
            .unwrap();

        assert_eq!(r1.motifs(), r4.motifs());
        assert_eq!(r1.motifs(), r0.motifs());
        assert_eq!(r1.scores(), r4.scores());
        assert_eq!(r1.run(), r0.run());
    }

    #[test]
    fn test_multi_seed_search() {
        let dna = dna();
        let motifs = multi_seed_search(&dna, 5, 8, 100, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(motifs.len(), 5);
        assert_eq!(motifs.width(), 8);
    }
}
