use std::fmt::Display;
use std::fmt::Formatter;
use std::sync::Arc;

use nom::error::Error as NomError;

#[derive(Clone, Debug)]
pub enum Error {
    /// An I/O error occured while reading the source.
    Io(Arc<std::io::Error>),
    /// A line contained a symbol outside of the alphabet.
    InvalidSymbol { line: usize, symbol: char },
    /// The source contained malformed data.
    InvalidData(String),
    /// The records could not be assembled into a collection.
    Core(gibbsmotif::err::Error),
}

impl Error {
    /// Build an error for a line that failed to parse.
    pub(crate) fn from_nom(line: usize, err: nom::Err<NomError<&'_ str>>) -> Self {
        match err {
            nom::Err::Incomplete(_) => {
                Error::InvalidData(format!("incomplete data on line {}", line))
            }
            nom::Err::Error(e) | nom::Err::Failure(e) => match e.input.chars().next() {
                Some(symbol) => Error::InvalidSymbol { line, symbol },
                None => Error::InvalidData(format!("unexpected end of line {}", line)),
            },
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io(Arc::new(error))
    }
}

impl From<gibbsmotif::err::Error> for Error {
    fn from(error: gibbsmotif::err::Error) -> Self {
        Error::Core(error)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
            Error::InvalidSymbol { line, symbol } => {
                write!(f, "invalid symbol {:?} on line {}", symbol, line)
            }
            Error::InvalidData(x) => write!(f, "invalid data: {}", x),
            Error::Core(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Core(e) => Some(e),
            Error::InvalidSymbol { .. } | Error::InvalidData(_) => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::InvalidSymbol {
            line: 3,
            symbol: 'N',
        };
        assert_eq!(err.to_string(), "invalid symbol 'N' on line 3");
        let err = Error::from(gibbsmotif::err::Error::EmptySequenceSet);
        assert!(std::error::Error::source(&err).is_some());
    }
}
