use ndarray::Array2;
use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::graph::Node;

/// Vectors are indexed by `Node`, so the length has to leave the shift `1 << n` in range.
pub const MAX_VECTOR_LENGTH: usize = 30;

/// A fixed length vector over {0, 1}.
///
/// Position 0 is the most significant bit of the enumeration index:
/// ```
/// use hamming_clique::vectors::BinaryVector;
/// let v = BinaryVector::from_index(6, 4);
/// assert_eq!(v.to_string(), "0110");
/// assert_eq!(v.index(), 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BinaryVector {
    bits: Vec<bool>,
}

impl BinaryVector {
    pub fn from_bits(bits: Vec<bool>) -> Self {
        BinaryVector { bits }
    }

    /// positions beyond the width of `Node` are zero
    pub fn from_index(index: Node, len: usize) -> Self {
        let bits = (0..len).rev()
            .map(|k| (index as u64).checked_shr(k as u32).unwrap_or(0) & 1 == 1)
            .collect();
        BinaryVector { bits }
    }

    /// position in the enumeration order of `generate_vectors(self.len())`
    pub fn index(&self) -> Node {
        self.bits.iter().fold(0, |acc, &b| (acc << 1) | b as Node)
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// number of ones
    pub fn weight(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Number of positions in which `self` and `other` differ.
    /// ```
    /// use hamming_clique::vectors::BinaryVector;
    /// let a = BinaryVector::from_index(0b10110, 5);
    /// let b = BinaryVector::from_index(0b00111, 5);
    /// assert_eq!(a.hamming_distance(&b).unwrap(), 2);
    /// assert!(a.hamming_distance(&BinaryVector::from_index(0, 4)).is_err());
    /// ```
    pub fn hamming_distance(&self, other: &BinaryVector) -> Result<usize> {
        if self.len() != other.len() {
            return Err(Error::LengthMismatch { left: self.len(), right: other.len() });
        }
        Ok(self.bits.iter().zip(&other.bits).filter(|(a, b)| a != b).count())
    }

    fn extended(&self, bit: bool) -> Self {
        let mut bits = Vec::with_capacity(self.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        BinaryVector { bits }
    }
}

impl std::fmt::Display for BinaryVector {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for &b in &self.bits {
            write!(f, "{}", if b { '1' } else { '0' })?;
        }
        Ok(())
    }
}

fn check_length(n: usize) -> Result<()> {
    if n > MAX_VECTOR_LENGTH {
        return Err(Error::LengthTooLarge { length: n, max: MAX_VECTOR_LENGTH });
    }
    Ok(())
}

/// All 2^n binary vectors of length n.
/// Built from the vectors of length n-1 by appending a 0 and then a 1 to each of them.
pub fn generate_vectors(n: usize) -> Result<Vec<BinaryVector>> {
    check_length(n)?;
    Ok(generate_vectors_rec(n))
}

fn generate_vectors_rec(n: usize) -> Vec<BinaryVector> {
    if n == 0 {
        return vec![BinaryVector::from_bits(vec![])];
    }
    let shorter = generate_vectors_rec(n - 1);
    let mut vectors = Vec::with_capacity(2 * shorter.len());
    for v in &shorter {
        vectors.push(v.extended(false));
        vectors.push(v.extended(true));
    }
    vectors
}

/// Lazy counterpart of `generate_vectors`, same order, one vector at a time.
#[derive(Clone, Debug)]
pub struct BinaryVectors {
    len: usize,
    next: u64,
    end: u64,
}

pub fn binary_vectors(n: usize) -> Result<BinaryVectors> {
    check_length(n)?;
    Ok(BinaryVectors { len: n, next: 0, end: 1 << n })
}

impl Iterator for BinaryVectors {
    type Item = BinaryVector;

    fn next(&mut self) -> Option<BinaryVector> {
        if self.next >= self.end {
            return None;
        }
        let v = BinaryVector::from_index(self.next as Node, self.len);
        self.next += 1;
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = (self.end - self.next) as usize;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for BinaryVectors {}

/// pairwise hamming distances; `m[(i, j)]` is the distance between `vectors[i]` and `vectors[j]`
pub fn distance_matrix(vectors: &[BinaryVector]) -> Result<Array2<usize>> {
    let mut mat = Array2::zeros((vectors.len(), vectors.len()));
    for ((i, j), d) in mat.indexed_iter_mut() {
        if i < j {
            *d = vectors[i].hamming_distance(&vectors[j])?;
        }
    }
    // fill the lower triangle from the upper one
    for i in 0..vectors.len() {
        for j in 0..i {
            mat[(i, j)] = mat[(j, i)];
        }
    }
    Ok(mat)
}

/// Minimum distance of a code: the smallest distance between two distinct codewords.
/// `None` for less than two codewords.
pub fn code_distance(codewords: &[BinaryVector]) -> Result<Option<usize>> {
    let mat = distance_matrix(codewords)?;
    Ok(mat.indexed_iter()
        .filter(|((i, j), _)| i < j)
        .map(|(_, &d)| d)
        .min())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn enumeration_order() {
        let vs = generate_vectors(2).unwrap();
        let strings: Vec<String> = vs.iter().map(|v| v.to_string()).collect();
        assert_eq!(strings, vec!["00", "01", "10", "11"]);
        assert_eq!(generate_vectors(0).unwrap(), vec![BinaryVector::from_bits(vec![])]);
    }

    #[test]
    fn all_distinct_and_full_length() {
        for n in 0..=8 {
            let vs = generate_vectors(n).unwrap();
            assert_eq!(vs.len(), 1 << n);
            assert!(vs.iter().all(|v| v.len() == n));
            let distinct: HashSet<_> = vs.iter().collect();
            assert_eq!(distinct.len(), vs.len());
            for (i, v) in vs.iter().enumerate() {
                assert_eq!(v.index() as usize, i);
                assert_eq!(*v, BinaryVector::from_index(i as Node, n));
            }
        }
    }

    #[test]
    fn lazy_matches_eager() {
        for n in 0..=7 {
            let lazy = binary_vectors(n).unwrap();
            assert_eq!(lazy.len(), 1 << n);
            assert_eq!(lazy.collect::<Vec<_>>(), generate_vectors(n).unwrap());
        }
    }

    #[test]
    fn length_bound() {
        assert!(generate_vectors(MAX_VECTOR_LENGTH + 1).is_err());
        assert!(matches!(binary_vectors(31), Err(Error::LengthTooLarge { length: 31, max: 30 })));
        // the lazy iterator does not allocate, so the largest length is fine
        assert_eq!(binary_vectors(MAX_VECTOR_LENGTH).unwrap().len(), 1 << 30);
    }

    #[test]
    fn distance_is_a_metric() {
        let vs = generate_vectors(4).unwrap();
        for a in &vs {
            for b in &vs {
                let ab = a.hamming_distance(b).unwrap();
                assert_eq!(ab, b.hamming_distance(a).unwrap());
                assert_eq!(ab == 0, a == b);
                assert_eq!(ab, (a.index() ^ b.index()).count_ones() as usize);
                for c in &vs {
                    let ac = a.hamming_distance(c).unwrap();
                    let cb = c.hamming_distance(b).unwrap();
                    assert!(ab <= ac + cb);
                }
            }
        }
    }

    #[test]
    fn long_vectors() {
        let v = BinaryVector::from_index(5, 70);
        assert_eq!(v.len(), 70);
        assert_eq!(v.weight(), 2);
        assert!(v.to_string().ends_with("0101"));
        assert_eq!(v.to_string().matches('1').count(), 2);
        assert_eq!(BinaryVector::from_index(Node::MAX, 64).weight(), 32);
        assert_eq!(BinaryVector::from_index(0b1011, 4).weight(), 3);
        assert_eq!(BinaryVector::from_index(0, 0).weight(), 0);
    }

    #[test]
    fn mismatched_lengths() {
        let a = BinaryVector::from_index(1, 3);
        let b = BinaryVector::from_index(1, 4);
        assert!(matches!(a.hamming_distance(&b), Err(Error::LengthMismatch { left: 3, right: 4 })));
        assert!(distance_matrix(&[a, b]).is_err());
    }

    #[test]
    fn matrix_and_code_distance() {
        let code: Vec<_> = [0b00000, 0b11100, 0b00111, 0b11011].iter()
            .map(|&i| BinaryVector::from_index(i, 5))
            .collect();
        let mat = distance_matrix(&code).unwrap();
        assert_eq!(mat, mat.t());
        assert_eq!(mat[(0, 1)], 3);
        assert_eq!(mat[(1, 3)], 3);
        assert_eq!(mat[(0, 3)], 4);
        assert_eq!(code_distance(&code).unwrap(), Some(3));
        assert_eq!(code_distance(&code[..1]).unwrap(), None);
    }
}
