use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("vector length {length} too large, at most {max} is supported")]
    LengthTooLarge { length: usize, max: usize },

    #[error("distance {distance} exceeds vector length {length}")]
    DistanceTooLarge { distance: usize, length: usize },

    #[error("hamming distance of vectors with different lengths {left} and {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("exhaustive search over {nnodes} vertices refused, at most {max} are supported")]
    TooManyVertices { nnodes: usize, max: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("malformed flag file, line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode or decode report: {0}")]
    Encoding(#[from] bincode::Error),
}
