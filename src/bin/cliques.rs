use clap::Parser;

use hamming_clique::*;
use hamming_clique::clique::{CliqueAlgorithm, CliqueSearch};
use hamming_clique::graph::CompactMatrixGraph;

/// Maximum clique size of an undirected graph stored as flag file
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Args {
    /// flag input file location
    input: String,

    /// discarding, classic, pivot or parallel
    #[clap(long, default_value = "pivot")]
    algorithm: CliqueAlgorithm,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let g: CompactMatrixGraph = io::read_flag_file(&args.input)?;
    let clique = g.maximum_clique(args.algorithm);
    println!("{}", clique.len());
    Ok(())
}
