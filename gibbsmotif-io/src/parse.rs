use gibbsmotif::abc::Alphabet;
use gibbsmotif::abc::Symbol;
use nom::bytes::complete::tag;
use nom::character::complete::anychar;
use nom::combinator::all_consuming;
use nom::combinator::map_res;
use nom::combinator::rest;
use nom::multi::fold_many0;
use nom::multi::many1;
use nom::sequence::preceded;
use nom::IResult;
use nom::Parser;

/// Parse a header line starting with `marker`, returning the header name.
pub fn header<'a>(marker: &str, input: &'a str) -> IResult<&'a str, &'a str> {
    preceded(tag(marker), rest).parse(input)
}

/// Parse a single alphabet symbol.
pub fn symbol<A: Alphabet>(input: &str) -> IResult<&str, A::Symbol> {
    map_res(anychar, A::Symbol::from_char).parse(input)
}

/// Parse a line made only of alphabet symbols.
pub fn sequence<A: Alphabet>(input: &str) -> IResult<&str, Vec<A::Symbol>> {
    all_consuming(many1(symbol::<A>)).parse(input)
}

/// Collect the uppercase letters of a line, skipping everything else.
pub fn uppercase(input: &str) -> IResult<&str, String> {
    fold_many0(anychar, String::new, |mut acc, c| {
        if c.is_ascii_uppercase() {
            acc.push(c);
        }
        acc
    })
    .parse(input)
}

#[cfg(test)]
mod test {
    use gibbsmotif::abc::Dna;
    use gibbsmotif::abc::Nucleotide;

    #[test]
    fn test_header() {
        let (_, name) = super::header(">", ">mm9_chr1:100-200").unwrap();
        assert_eq!(name, "mm9_chr1:100-200");
        assert!(super::header(">mm", ">hg19").is_err());
        assert!(super::header(">", "ACGT").is_err());
    }

    #[test]
    fn test_sequence() {
        let (rest, symbols) = super::sequence::<Dna>("ACGT").unwrap();
        assert_eq!(rest, "");
        assert_eq!(
            symbols,
            [Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T]
        );
        match super::sequence::<Dna>("ACNT") {
            Err(nom::Err::Error(e)) => assert_eq!(e.input, "NT"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_uppercase() {
        let (_, motif) = super::uppercase("acgtGATAAGcca").unwrap();
        assert_eq!(motif, "GATAAG");
        let (_, motif) = super::uppercase("acgt").unwrap();
        assert_eq!(motif, "");
    }
}
