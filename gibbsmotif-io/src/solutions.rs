//! Reader for reference motif solutions.
//!
//! Solution files mirror sequence files, with the true motif occurence of
//! each sequence written in capital letters and the rest of the sequence
//! in lowercase:
//! ```text
//! >mm9_chr1:3204553-3204652
//! tGATAAGAgcgtctgggttaa
//! ```

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use gibbsmotif::abc::Alphabet;
use gibbsmotif::abc::Dna;
use gibbsmotif::motif::MotifSet;
use gibbsmotif::seq::EncodedSequence;
use log::debug;

use crate::error::Error;
use crate::sequences::DEFAULT_MARKER;

/// A reader for motif solution files.
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

    /// Read all remaining motifs into a motif set.
    pub fn into_motif_set(self) -> Result<MotifSet<A>, Error> {
        let motifs = self.collect::<Result<Vec<_>, _>>()?;
        let motifs = MotifSet::new(motifs)?;
        debug!("read {} motifs of width {}", motifs.len(), motifs.width());
        Ok(motifs)
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
            let motif = match super::parse::uppercase(text) {
                Ok((_, motif)) => motif,
                Err(e) => return Some(Err(Error::from_nom(self.line, e))),
            };
            if motif.is_empty() {
                return Some(Err(Error::InvalidData(format!(
                    "no motif on line {}",
                    self.line
                ))));
            }
            return match EncodedSequence::encode(&motif) {
                Ok(seq) => Some(Ok(seq)),
                Err(e) => Some(Err(Error::InvalidSymbol {
                    line: self.line,
                    symbol: e.0,
                })),
            };
        }
    }
}

pub fn read<B: BufRead, A: Alphabet>(reader: B) -> self::Reader<B, A> {
    self::Reader::new(reader)
}

/// Load a reference motif set from the file at `path`.
pub fn load<A: Alphabet, P: AsRef<Path>>(path: P) -> Result<MotifSet<A>, Error> {
    let file = File::open(path)?;
    self::read(BufReader::new(file)).into_motif_set()
}
