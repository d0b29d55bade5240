use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Context;
use clap::ArgAction;
use clap::Parser;
use gibbsmotif::abc::Dna;
use gibbsmotif::motif::MotifSet;
use gibbsmotif::search::MotifSearch;
use gibbsmotif::search::SearchResult;
use gibbsmotif::seq::SequenceSet;
use gibbsmotif_io::sequences::DEFAULT_MARKER;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

// --- Parameters --------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Parameters {
    /// sequence file to load
    #[arg(short, long, required = true)]
    sequences: PathBuf,
    /// solution file with the true motifs in capital letters
    #[arg(short = 'S', long)]
    solutions: Option<PathBuf>,

    /// output file to write the report to, instead of the standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// length of the motif to search
    #[arg(short, default_value_t = 11)]
    k: usize,
    /// number of iterations of each sampler run
    #[arg(short = 'N', long, default_value_t = 1000)]
    iterations: usize,
    /// number of independent sampler runs
    #[arg(short = 'n', long, default_value_t = 20)]
    seeds: usize,
    /// seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,
    /// number of threads to use in parallel, 0 to use all cores
    #[arg(short = 'j', long, default_value_t = 0)]
    jobs: usize,

    /// prefix of the header lines in the input files
    #[arg(long, default_value = DEFAULT_MARKER)]
    marker: String,

    /// increase the logging verbosity
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn open_compressed<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>, std::io::Error> {
    let mut file = File::open(path).map(BufReader::new)?;
    match file.fill_buf()? {
        &[0x1f, 0x8b, ..] => Ok(flate2::read::MultiGzDecoder::new(file))
            .map(BufReader::new)
            .map(|r| Box::new(r) as Box<dyn BufRead>),
        _ => Ok(Box::new(file)),
    }
}

fn load_sequences(params: &Parameters) -> anyhow::Result<SequenceSet<Dna>> {
    let reader = open_compressed(&params.sequences)
        .with_context(|| format!("failed to open {}", params.sequences.display()))?;
    gibbsmotif_io::sequences::Reader::new(reader)
        .with_marker(params.marker.as_str())
        .into_sequence_set()
        .with_context(|| format!("failed to load {}", params.sequences.display()))
}

fn load_solutions(params: &Parameters, path: &Path) -> anyhow::Result<MotifSet<Dna>> {
    let reader =
        open_compressed(path).with_context(|| format!("failed to open {}", path.display()))?;
    gibbsmotif_io::solutions::Reader::new(reader)
        .with_marker(params.marker.as_str())
        .into_motif_set()
        .with_context(|| format!("failed to load {}", path.display()))
}

// --- Report ------------------------------------------------------------------

fn write_report<W: Write>(
    mut out: W,
    result: &SearchResult<Dna>,
    solutions: Option<&MotifSet<Dna>>,
) -> anyhow::Result<()> {
    writeln!(out, "Gibbs Sampler Motifs")?;
    writeln!(
        out,
        "Best score: {} (run {} of {})",
        result.score(),
        result.run() + 1,
        result.scores().len()
    )?;
    writeln!(out, "Consensus:  {}", result.motifs().consensus())?;

    match solutions {
        None => {
            writeln!(out)?;
            write!(out, "{}", result.motifs())?;
        }
        Some(solutions) => {
            if solutions.len() != result.motifs().len() {
                bail!(
                    "found {} solutions for {} sequences",
                    solutions.len(),
                    result.motifs().len()
                );
            }
            writeln!(out, "Real Motifs")?;
            writeln!(out, "Real score: {}", solutions.score())?;
            writeln!(out)?;

            let width = result.motifs().width().max("Algorithm".len());
            writeln!(
                out,
                "{:<width$}  {:<11}  {}",
                "Algorithm",
                "Match/Wrong",
                "Real",
                width = width
            )?;
            let mut matches = 0;
            for (found, real) in result.motifs().iter().zip(solutions.iter()) {
                let status = if found == real {
                    matches += 1;
                    "Match"
                } else {
                    "Wrong"
                };
                writeln!(
                    out,
                    "{:<width$}  {:<11}  {}",
                    found.to_string(),
                    status,
                    real,
                    width = width
                )?;
            }
            writeln!(out)?;
            writeln!(out, "Matched {} of {} motifs", matches, solutions.len())?;
        }
    }

    out.flush()?;
    Ok(())
}

// --- Main --------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    let params = Parameters::parse();

    let level = match params.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let dna = load_sequences(&params)?;
    info!(
        "loaded {} sequences of length {}",
        dna.len(),
        dna.sequence_length()
    );
    let solutions = match &params.solutions {
        Some(path) => Some(load_solutions(&params, path)?),
        None => None,
    };

    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let pbar = ProgressBar::new(params.seeds as u64).with_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .context("invalid progress bar template")?,
    );
    pbar.set_message("runs");
    let result = MotifSearch::new(params.k)
        .iterations(params.iterations)
        .seeds(params.seeds)
        .threads(params.jobs)
        .run_with(&dna, &mut rng, |_, _| pbar.inc(1))
        .context("motif search failed")?;
    pbar.finish_and_clear();

    match &params.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_report(BufWriter::new(file), &result, solutions.as_ref())
        }
        None => write_report(std::io::stdout().lock(), &result, solutions.as_ref()),
    }
}
