//! Reader for collections of equal-length sequences.
//!
//! Sequence files contain one sequence per line. Header lines start with a
//! marker (`>` by default) and are skipped, as are blank lines:
//! ```text
//! >mm9_chr1:3204553-3204652
//! TGATAAGAGCGTCTGGGTTAA
//! >mm9_chr1:4352271-4352370
//! CCTTTGCAGATAAGGGCATCC
//! ```

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use gibbsmotif::abc::Alphabet;
use gibbsmotif::abc::Dna;
use gibbsmotif::seq::EncodedSequence;
use gibbsmotif::seq::SequenceSet;
use log::debug;

use crate::error::Error;

/// The default prefix of header lines.
pub const DEFAULT_MARKER: &str = ">";

/// A reader for line-based sequence files.
#[derive(Debug)]
pub struct Reader<B: BufRead, A: Alphabet = Dna> {
    buffer: String,
    bufread: B,
    marker: String,
    line: usize,
    _alphabet: std::marker::PhantomData<A>,
}

impl<B: BufRead, A: Alphabet> Reader<B, A> {
    pub fn new(reader: B) -> Self {
        Self {
            bufread: reader,
            buffer: String::new(),
            marker: String::from(DEFAULT_MARKER),
            line: 0,
            _alphabet: std::marker::PhantomData,
        }
    }

    /// Use a different prefix to recognize header lines.
    pub fn with_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.marker = marker.into();
        self
    }

    /// Read all remaining sequences into a sequence collection.
    pub fn into_sequence_set(self) -> Result<SequenceSet<A>, Error> {
        let sequences = self.collect::<Result<Vec<_>, _>>()?;
        let dna = SequenceSet::new(sequences)?;
        debug!(
            "read {} sequences of length {}",
            dna.len(),
            dna.sequence_length()
        );
        Ok(dna)
    }
}

impl<B: BufRead, A: Alphabet> Iterator for Reader<B, A> {
    type Item = Result<EncodedSequence<A>, Error>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.bufread.read_line(&mut self.buffer) {
                Err(e) => return Some(Err(Error::from(e))),
                Ok(0) => return None,
                Ok(_) => self.line += 1,
            }
            let text = self.buffer.trim();
            if text.is_empty() || super::parse::header(&self.marker, text).is_ok() {
                continue;
            }
            return match super::parse::sequence::<A>(text) {
                Ok((_, symbols)) => Some(Ok(EncodedSequence::new(symbols))),
                Err(e) => Some(Err(Error::from_nom(self.line, e))),
            };
        }
    }
}

pub fn read<B: BufRead, A: Alphabet>(reader: B) -> self::Reader<B, A> {
    self::Reader::new(reader)
}

/// Load a sequence collection from the file at `path`.
pub fn load<A: Alphabet, P: AsRef<Path>>(path: P) -> Result<SequenceSet<A>, Error> {
    let file = File::open(path)?;
    self::read(BufReader::new(file)).into_sequence_set()
}
