//! Exhaustive searches over all subsets. Only usable on tiny instances, they serve as
//! reference results for the clique searches.

use crate::error::{Error, Result};
use crate::graph::{Node, UndirectedGraph};
use crate::vectors::generate_vectors;

pub const MAX_EXHAUSTIVE_NODES: usize = 20;

/// 2^4 codewords, so at most 2^16 subsets
pub const MAX_EXHAUSTIVE_LENGTH: usize = 4;

/// A maximum clique found by trying every vertex subset.
/// Among several maximum cliques, the one with the smallest bitmask is returned.
pub fn maximum_clique<G: UndirectedGraph + ?Sized>(g: &G) -> Result<Vec<Node>> {
    let nnodes = g.nnodes();
    if nnodes > MAX_EXHAUSTIVE_NODES {
        return Err(Error::TooManyVertices { nnodes, max: MAX_EXHAUSTIVE_NODES });
    }
    let neighborhoods: Vec<u64> = g.iter_nodes()
        .map(|v| g.neighbors(v).iter().fold(0, |m, &w| m | 1 << w))
        .collect();
    Ok(nodes_of(best_subset(nnodes, &neighborhoods)))
}

/// A(n, d) by brute force: the largest set of length n vectors with pairwise distance at least d.
pub fn max_code_size(n: usize, d: usize) -> Result<usize> {
    if n > MAX_EXHAUSTIVE_LENGTH {
        return Err(Error::LengthTooLarge { length: n, max: MAX_EXHAUSTIVE_LENGTH });
    }
    let vectors = generate_vectors(n)?;
    let mut compatible = vec![0u64; vectors.len()];
    for (i, a) in vectors.iter().enumerate() {
        for (j, b) in vectors.iter().enumerate() {
            if i != j && a.hamming_distance(b)? >= d {
                compatible[i] |= 1 << j;
            }
        }
    }
    Ok(best_subset(vectors.len(), &compatible).count_ones() as usize)
}

/// largest mask whose members are pairwise compatible
fn best_subset(nitems: usize, compatible: &[u64]) -> u64 {
    let mut best: u64 = 0;
    for mask in 0..(1u64 << nitems) {
        if mask.count_ones() > best.count_ones() && pairwise_compatible(mask, compatible) {
            best = mask;
        }
    }
    best
}

fn pairwise_compatible(mask: u64, compatible: &[u64]) -> bool {
    let mut rest = mask;
    while rest != 0 {
        let v = rest.trailing_zeros();
        rest &= rest - 1;
        if mask & !(1 << v) & !compatible[v as usize] != 0 {
            return false;
        }
    }
    true
}

fn nodes_of(mask: u64) -> Vec<Node> {
    (0..u64::BITS).filter(|&b| mask & (1 << b) != 0).collect()
}
