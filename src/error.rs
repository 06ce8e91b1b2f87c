use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("the link graph has no pages")]
    EmptyGraph,

    #[error("sample count must be positive")]
    ZeroSamples,

    #[error("page not in the link graph: {0}")]
    UnknownPage(String),

    #[error("damping factor out of range: {0}")]
    InvalidDamping(f64),

    #[error("convergence tolerance must be positive: {0}")]
    InvalidEpsilon(f64),

    #[error("iteration limit must be positive")]
    ZeroIterations,

    #[error("no convergence after {iterations} iterations")]
    NotConverged { iterations: usize },

    #[error("degenerate distribution: {0}")]
    Degenerate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
