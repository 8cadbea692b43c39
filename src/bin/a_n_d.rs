use std::process::ExitCode;

use clap::Parser;

use hamming_clique::*;
use hamming_clique::clique::CliqueAlgorithm;
use hamming_clique::config::{Config, Representation};
use hamming_clique::graph::{AdjacencyListGraph, CompactMatrixGraph, EdgeRule, UndirectedGraph};

/// Size of a maximum clique in the hamming graph H(n,d)
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Args {
    /// vector length n
    #[clap(short = 'n', long = "length", default_value_t = 5)]
    n: usize,

    /// distance threshold d
    #[clap(short = 'd', long = "distance", default_value_t = 4)]
    d: usize,

    /// within: edge if distance <= d, at-least: edge if distance >= d
    #[clap(long, default_value = "within")]
    rule: EdgeRule,

    /// discarding, classic, pivot or parallel
    #[clap(long, default_value = "discarding")]
    algorithm: CliqueAlgorithm,

    /// list or matrix
    #[clap(long, default_value = "list")]
    representation: Representation,

    /// write the hamming graph as flag file
    #[clap(long)]
    save_graph: Option<String>,

    /// write the result (bincode)
    #[clap(long)]
    save_report: Option<String>,

    /// also print the codewords of the clique and their weights
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();
    match a_n_d(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn a_n_d(args: &Args) -> Result<()> {
    let config = Config {
        length: args.n,
        distance: args.d,
        edge_rule: args.rule,
        algorithm: args.algorithm,
        representation: args.representation,
    };
    match config.representation {
        Representation::List => output(args, run_on::<AdjacencyListGraph>(&config)?),
        Representation::Matrix => output(args, run_on::<CompactMatrixGraph>(&config)?),
    }
}

fn output<G: UndirectedGraph>(args: &Args, (graph, report): (G, CliqueReport)) -> Result<()> {
    println!("{}", report);

    if args.verbose {
        for w in &report.codewords {
            println!("{} weight {}", w, w.weight());
        }
        if let Some(dist) = report.code_distance {
            println!("minimum distance {}", dist);
        }
    }
    if let Some(fname) = &args.save_graph {
        io::save_flag_file(fname, &graph)?;
    }
    if let Some(fname) = &args.save_report {
        io::save_report(fname, &report)?;
    }
    Ok(())
}
