use serde::{Serialize, Deserialize};

use crate::clique::CliqueAlgorithm;
use crate::error::{Error, Result};
use crate::graph::EdgeRule;
use crate::vectors::MAX_VECTOR_LENGTH;

/// Which graph type holds the hamming graph during the search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Representation {
    /// `AdjacencyListGraph`
    List,
    /// `CompactMatrixGraph`
    Matrix,
}

impl std::str::FromStr for Representation {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "list" => Ok(Representation::List),
            "matrix" => Ok(Representation::Matrix),
            _ => Err(Error::InvalidArgument(format!("unknown representation {:?}, expected list or matrix", s))),
        }
    }
}

impl std::fmt::Display for Representation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(match self {
            Representation::List => "list",
            Representation::Matrix => "matrix",
        })
    }
}

/// Everything one computation of A(n, d) depends on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// vector length n
    pub length: usize,
    /// distance threshold d
    pub distance: usize,
    pub edge_rule: EdgeRule,
    pub algorithm: CliqueAlgorithm,
    pub representation: Representation,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            length: 5,
            distance: 4,
            edge_rule: EdgeRule::Within,
            algorithm: CliqueAlgorithm::Discarding,
            representation: Representation::List,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.length > MAX_VECTOR_LENGTH {
            return Err(Error::LengthTooLarge { length: self.length, max: MAX_VECTOR_LENGTH });
        }
        if self.distance > self.length {
            return Err(Error::DistanceTooLarge { distance: self.distance, length: self.length });
        }
        Ok(())
    }
}
