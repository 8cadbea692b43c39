//! Maximum cliques in hamming graphs.
//!
//! The vertices of the hamming graph H(n, d) are all binary vectors of length n, two of them
//! are adjacent if their hamming distance is within d (or, with `EdgeRule::AtLeast`, at least d).
//! The size of the largest clique is reported as A(n, d).

use serde::{Serialize, Deserialize};
use tracing::info;

pub mod error;
pub use error::{Error, Result};

pub mod vectors;
use vectors::BinaryVector;

pub mod graph;
use graph::*;

pub mod clique;
use clique::{CliqueSearch, MaximumClique};

pub mod brute_force;

pub mod config;
use config::{Config, Representation};

pub mod io;

mod util;

/// Outcome of one computation, everything needed to print or store it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliqueReport {
    pub config: Config,
    /// vertices in the order they were added to the clique
    pub clique: Vec<Node>,
    pub codewords: Vec<BinaryVector>,
    /// minimum distance between two codewords
    pub code_distance: Option<usize>,
    pub nnodes: usize,
    pub nedges: usize,
    pub calls: usize,
    pub terminals: usize,
}

impl CliqueReport {
    pub fn size(&self) -> usize {
        self.clique.len()
    }

    fn new<G: UndirectedGraph>(config: Config, graph: &G, best: MaximumClique) -> Result<Self> {
        let codewords: Vec<BinaryVector> = best.clique.iter()
            .map(|&v| BinaryVector::from_index(v, config.length))
            .collect();
        let code_distance = vectors::code_distance(&codewords)?;
        Ok(CliqueReport {
            config,
            clique: best.clique,
            codewords,
            code_distance,
            nnodes: graph.nnodes(),
            nedges: graph.nedges(),
            calls: best.calls,
            terminals: best.terminals,
        })
    }
}

impl std::fmt::Display for CliqueReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "A({},{}) = {}", self.config.length, self.config.distance, self.size())
    }
}

/// Logs go to stderr, filtered by `RUST_LOG` (default: warnings of this crate).
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hamming_clique=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Builds the hamming graph described by `config` and searches it for a maximum clique.
pub fn run(config: &Config) -> Result<CliqueReport> {
    match config.representation {
        Representation::List => run_on::<AdjacencyListGraph>(config).map(|(_, report)| report),
        Representation::Matrix => run_on::<CompactMatrixGraph>(config).map(|(_, report)| report),
    }
}

/// Like `run`, but with the graph type chosen by the caller, and the graph is handed back.
/// `config.representation` is ignored.
pub fn run_on<G: UndirectedGraphNew>(config: &Config) -> Result<(G, CliqueReport)> {
    config.validate()?;
    let graph: G = hamming_graph(config.length, config.distance, config.edge_rule)?;
    info!(nnodes = graph.nnodes(), nedges = graph.nedges(), representation = %config.representation, "hamming graph built");
    let best = graph.maximum_clique_with_stats(config.algorithm);
    info!(size = best.len(), algorithm = %config.algorithm, "clique found");
    let report = CliqueReport::new(config.clone(), &graph, best)?;
    Ok((graph, report))
}

pub mod examples {
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256StarStar;

    use crate::graph::*;

    /// maximal cliques {0,1,2}, {0,2,5,6}, {1,2,3} and the isolated vertex 4
    pub fn gengraph() -> AdjacencyListGraph {
        let mut g = AdjacencyListGraph::new_disconnected(7);

        // 0,1,2
        g.add_edge(0,1);
        g.add_edge(0,2);
        g.add_edge(1,2);

        // 1,2,3
        g.add_edge(2,3);
        g.add_edge(3,1);

        // 0,2,5,6
        g.add_edge(0,5);
        g.add_edge(0,6);
        g.add_edge(2,5);
        g.add_edge(2,6);
        g.add_edge(5,6);

        // 4 is left over and maximal
        g
    }

    /// Erdős–Rényi graph: every pair is an edge with probability p
    pub fn gen_random<G: UndirectedGraphNew>(nnodes: u32, p: f64, seed: u64) -> G {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let mut g = G::new_disconnected(nnodes as usize);
        for a in 0..nnodes {
            for b in a + 1..nnodes {
                if rng.gen_bool(p) {
                    g.add_edge(a, b);
                }
            }
        }
        g
    }
}
