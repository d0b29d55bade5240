extern crate gibbsmotif;
extern crate rand;

use gibbsmotif::abc::Dna;
use gibbsmotif::err::Error;
use gibbsmotif::pwm::build_profile;
use gibbsmotif::sampler::gibbs_sampler_run;
use gibbsmotif::sampler::sample_replacement;
use gibbsmotif::sampler::Sampler;
use gibbsmotif::seq::EncodedSequence;
use gibbsmotif::seq::SequenceSet;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

const SEQUENCES: &[&str] = &["GGACTTCAGGCCTA", "GGTCTGAGGCAATC"];

#[test]
fn improves_over_random_start() {
    let dna = SequenceSet::<Dna>::encode(SEQUENCES).unwrap();
    let mut improved = 0;
    for seed in 0..20 {
        let rng = StdRng::seed_from_u64(seed);
        let result = Sampler::new(&dna, 4, 100, rng).unwrap().finish().unwrap();
        assert!(result.score() <= result.initial_score());
        if result.score() < result.initial_score() {
            improved += 1;
        }
    }
    assert!(improved >= 15, "only {} runs out of 20 improved", improved);
}

#[test]
fn best_score_never_increases() {
    let dna = SequenceSet::<Dna>::encode(SEQUENCES).unwrap();
    for seed in 0..5 {
        let sampler = Sampler::new(&dna, 5, 200, StdRng::seed_from_u64(seed)).unwrap();
        let mut best = sampler.best_score();
        for iteration in sampler {
            let iteration = iteration.unwrap();
            assert!(iteration.best_score <= best);
            best = iteration.best_score;
        }
    }
}

#[test]
fn replacement_follows_profile() {
    // a profile built from many copies of the same motif strongly favors
    // the window matching it
    let motifs = vec![EncodedSequence::<Dna>::encode("GATTACA").unwrap(); 50];
    let profile = build_profile::<Dna, _>(&motifs).unwrap();
    let seq = EncodedSequence::<Dna>::encode("CCCCCCCGATTACACCCCC").unwrap();

    let mut rng = StdRng::seed_from_u64(42);
    let n = 1000;
    let hits = (0..n)
        .map(|_| sample_replacement(&profile, &seq, &mut rng).unwrap())
        .filter(|window| window.to_string() == "GATTACA")
        .count();
    assert!(hits > 950, "expected window drawn {} times out of {}", hits, n);
}

#[test]
fn preconditions_checked() {
    let dna = SequenceSet::<Dna>::encode(SEQUENCES).unwrap();
    let rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        Sampler::new(&dna, 0, 100, rng.clone()),
        Err(Error::InvalidMotifLength(0))
    ));
    assert!(matches!(
        Sampler::new(&dna, 20, 100, rng.clone()),
        Err(Error::MotifTooLong { k: 20, length: 14 })
    ));
    assert!(matches!(
        Sampler::new(&dna, 4, 0, rng),
        Err(Error::InvalidIterations(0))
    ));
}

#[test]
fn long_motifs_do_not_underflow() {
    let mut rng = StdRng::seed_from_u64(1200);
    let sequences = (0..10)
        .map(|_| {
            (0..1200)
                .map(|_| b"ACGT"[rng.gen_range(0..4)] as char)
                .collect::<String>()
        })
        .collect::<Vec<_>>();
    let dna = SequenceSet::<Dna>::encode(&sequences).unwrap();

    let motifs = gibbs_sampler_run(&dna, 1000, 20, &mut rng).unwrap();
    assert_eq!(motifs.len(), 10);
    assert_eq!(motifs.width(), 1000);
}
