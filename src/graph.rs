pub type Node = u32;

pub type Edge = [Node; 2];

use std::hash::BuildHasherDefault;

use indexmap::IndexMap;
use rayon::prelude::*;
use seahash::SeaHasher;
use serde::{Serialize, Deserialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::vectors::generate_vectors;

pub trait UndirectedGraph: Sync {
    fn has_edge(&self, a: Node, b: Node) -> bool;
    fn add_edge(&mut self, a: Node, b: Node);
    fn nnodes(&self) -> usize;
    /// neighbors of v. list graphs keep insertion order, matrix graphs are ascending.
    fn neighbors(&self, v: Node) -> Vec<Node>;

    fn iter_nodes(&self) -> std::ops::Range<Node> {
        0..(self.nnodes() as Node)
    }

    fn degree(&self, v: Node) -> usize {
        self.neighbors(v).len()
    }

    /// every edge once, as [smaller, larger]
    fn edges(&self) -> Vec<Edge> {
        let mut edges = vec![];
        for a in self.iter_nodes() {
            for b in self.neighbors(a) {
                if a < b {
                    edges.push([a, b]);
                }
            }
        }
        edges
    }

    fn nedges(&self) -> usize {
        self.edges().len()
    }
}

pub trait UndirectedGraphNew: UndirectedGraph + Sized {
    fn new_disconnected(nnodes: usize) -> Self;

    fn from_edges(nnodes: usize, edges: &[Edge]) -> Self {
        let mut g = Self::new_disconnected(nnodes);
        for &[a, b] in edges {
            g.add_edge(a, b);
        }
        g
    }

    fn copy<G: UndirectedGraph + ?Sized>(g: &G) -> Self {
        Self::from_edges(g.nnodes(), &g.edges())
    }
}

type AdjacencyMap = IndexMap<Node, Vec<Node>, BuildHasherDefault<SeaHasher>>;

/// Neighbor lists keyed by vertex.
/// Only vertices that got an edge have a key; all others read as having no neighbors.
/// Adding the same edge twice stores it twice.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyListGraph {
    nnodes: usize,
    adjacency: AdjacencyMap,
}

impl AdjacencyListGraph {
    /// number of vertices with at least one edge
    pub fn nvertices_with_edges(&self) -> usize {
        self.adjacency.len()
    }

    pub fn neighbor_list(&self, v: Node) -> &[Node] {
        match self.adjacency.get(&v) {
            Some(list) => list,
            None => &[],
        }
    }

    fn check_bounds(&self, a: Node, b: Node) {
        if a as usize >= self.nnodes {
            panic!("vertex out of bounds: {} >= {}", a, self.nnodes);
        }
        if b as usize >= self.nnodes {
            panic!("vertex out of bounds: {} >= {}", b, self.nnodes);
        }
    }
}

impl UndirectedGraphNew for AdjacencyListGraph {
    fn new_disconnected(nnodes: usize) -> Self {
        AdjacencyListGraph { nnodes, adjacency: Default::default() }
    }
}

impl UndirectedGraph for AdjacencyListGraph {
    fn nnodes(&self) -> usize {
        self.nnodes
    }

    fn has_edge(&self, a: Node, b: Node) -> bool {
        self.check_bounds(a, b);
        self.neighbor_list(a).contains(&b)
    }

    fn add_edge(&mut self, a: Node, b: Node) {
        self.check_bounds(a, b);
        assert!(a != b, "self loop at {}", a);
        self.adjacency.entry(a).or_default().push(b);
        self.adjacency.entry(b).or_default().push(a);
    }

    fn neighbors(&self, v: Node) -> Vec<Node> {
        self.neighbor_list(v).to_vec()
    }

    fn degree(&self, v: Node) -> usize {
        self.neighbor_list(v).len()
    }
}

type Chunk = u64;
const CHUNK_SIZE: usize = Chunk::BITS as usize;

/// Symmetric adjacency matrix, one bit per vertex pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactMatrixGraph {
    nnodes: usize,
    row_len: usize,
    matrix: Vec<Chunk>,
}

impl CompactMatrixGraph {
    fn set_bit(&mut self, row: Node, col: Node) {
        let colh = col as usize / CHUNK_SIZE;
        let coll = col as usize % CHUNK_SIZE;
        self.matrix[row as usize * self.row_len + colh] |= 1 << coll;
    }
}

impl UndirectedGraphNew for CompactMatrixGraph {
    fn new_disconnected(nnodes: usize) -> Self {
        // nnodes / CHUNK_SIZE, rounded up.
        let row_len = (nnodes + CHUNK_SIZE - 1) / CHUNK_SIZE;
        let matsize = row_len.checked_mul(nnodes).expect("size of adjacency matrix overflows");
        CompactMatrixGraph { nnodes, row_len, matrix: vec![0; matsize] }
    }
}

impl UndirectedGraph for CompactMatrixGraph {
    fn nnodes(&self) -> usize {
        self.nnodes
    }

    fn has_edge(&self, a: Node, b: Node) -> bool {
        if a as usize >= self.nnodes {
            panic!("vertex out of bounds: {} >= {}", a, self.nnodes);
        }
        if b as usize >= self.nnodes {
            panic!("vertex out of bounds: {} >= {}", b, self.nnodes);
        }
        let bh = b as usize / CHUNK_SIZE;
        let bl = b as usize % CHUNK_SIZE;
        self.matrix[a as usize * self.row_len + bh] & (1 << bl) != 0
    }

    fn add_edge(&mut self, a: Node, b: Node) {
        assert!((a as usize) < self.nnodes && (b as usize) < self.nnodes && a != b);
        self.set_bit(a, b);
        self.set_bit(b, a);
    }

    /// ```
    /// use hamming_clique::graph::*;
    /// let mut g = CompactMatrixGraph::new_disconnected(70);
    /// g.add_edge(2, 3);
    /// g.add_edge(2, 66);
    /// assert_eq!(g.neighbors(2), vec![3, 66]);
    /// assert_eq!(g.neighbors(66), vec![2]);
    /// ```
    fn neighbors(&self, v: Node) -> Vec<Node> {
        let offset = self.row_len * v as usize;
        let mut result = vec![];
        for h in 0..self.row_len {
            let mut bits = self.matrix[offset + h];
            while bits != 0 {
                let b = bits.trailing_zeros();
                bits &= !(1 << b);
                result.push(h as Node * Chunk::BITS | b);
            }
        }
        result
    }

    fn degree(&self, v: Node) -> usize {
        let offset = self.row_len * v as usize;
        self.matrix[offset..offset + self.row_len].iter().map(|c| c.count_ones() as usize).sum()
    }
}

/// When two vectors at a given hamming distance get an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeRule {
    /// distance <= d: cliques are sets of mutually close vectors
    Within,
    /// distance >= d: cliques are codes of minimum distance d
    AtLeast,
}

impl EdgeRule {
    pub fn connects(self, distance: usize, d: usize) -> bool {
        match self {
            EdgeRule::Within => distance <= d,
            EdgeRule::AtLeast => distance >= d,
        }
    }
}

impl std::str::FromStr for EdgeRule {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "within" => Ok(EdgeRule::Within),
            "at-least" => Ok(EdgeRule::AtLeast),
            _ => Err(Error::InvalidArgument(format!("unknown edge rule {:?}, expected within or at-least", s))),
        }
    }
}

impl std::fmt::Display for EdgeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(match self {
            EdgeRule::Within => "within",
            EdgeRule::AtLeast => "at-least",
        })
    }
}

/// Hamming graph on all binary vectors of length n.
/// Vertex i is the i-th vector of `generate_vectors(n)`, edges follow `rule` with threshold d.
pub fn hamming_graph<G: UndirectedGraphNew>(n: usize, d: usize, rule: EdgeRule) -> Result<G> {
    let vectors = generate_vectors(n)?;
    info!(n, d, %rule, nvectors = vectors.len(), "building hamming graph");

    // rows are computed in parallel, but inserted in (i, j) order so neighbor lists come out
    // exactly as with a sequential pass
    let rows: Vec<Vec<Node>> = (0..vectors.len()).into_par_iter().map(|i| -> Result<Vec<Node>> {
        let mut row = vec![];
        for j in i + 1..vectors.len() {
            if rule.connects(vectors[i].hamming_distance(&vectors[j])?, d) {
                row.push(j as Node);
            }
        }
        Ok(row)
    }).collect::<Result<_>>()?;

    let mut graph = G::new_disconnected(vectors.len());
    for (i, row) in rows.into_iter().enumerate() {
        for j in row {
            graph.add_edge(i as Node, j);
        }
    }
    Ok(graph)
}
