#![doc = include_str!("../README.md")]

extern crate generic_array;
extern crate typenum;

pub mod abc;
pub mod dense;
pub mod err;
pub mod motif;
pub mod pwm;
pub mod sampler;
pub mod search;
pub mod seq;

pub use abc::Alphabet;
pub use abc::Dna;
pub use abc::Nucleotide;
pub use abc::Pseudocounts;
pub use abc::Symbol;
pub use dense::DenseMatrix;
pub use err::Error;
pub use err::InvalidSymbol;
pub use motif::hamming;
pub use motif::score;
pub use motif::MotifSet;
pub use pwm::build_profile;
pub use pwm::CountMatrix;
pub use pwm::Profile;
pub use sampler::gibbs_sampler_run;
pub use sampler::sample_replacement;
pub use sampler::Sampler;
pub use search::multi_seed_search;
pub use search::MotifSearch;
pub use seq::EncodedSequence;
pub use seq::SequenceSet;
