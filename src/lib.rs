pub mod corpus;
mod error;
pub use self::error::{Error, Result};
pub mod graph;
pub use self::graph::LinkGraph;
mod common;
pub use self::common::*;

pub mod page_rank;
pub use self::page_rank::{iterate_rank, sample_rank, transition, Distribution, RankMapping};

#[cfg(test)]
mod testing;
