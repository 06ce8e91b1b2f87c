//! PageRank estimators over a [`LinkGraph`](crate::LinkGraph).
//!
//! [`sampled`] simulates a random surfer driven by the [`transition`] model,
//! [`iterated`] solves the fixed-point equation directly. Both produce a
//! [`RankMapping`] summing to 1.

mod traits;
pub use self::traits::*;
pub mod iterated;
pub use self::iterated::iterate_rank;
pub mod sampled;
pub use self::sampled::sample_rank;
pub mod transition;
pub use self::transition::{transition, Distribution};

use crate::Error;
use std::collections::HashMap;

pub const DEFAULT_DAMPING: f64 = 0.85;

/// Estimated rank of every page.
pub type RankMapping<P> = HashMap<P, f64, ahash::RandomState>;

fn check_damping(damping: f64) -> crate::Result<()> {
    if (0.0..=1.0).contains(&damping) {
        Ok(())
    } else {
        Err(Error::InvalidDamping(damping))
    }
}
