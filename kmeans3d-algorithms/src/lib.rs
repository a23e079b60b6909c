//! # kmeans3d Algorithms
//!
//! The algorithmic half of the clustering core: synthetic scene generation,
//! nearest-centroid assignment and centroid re-estimation.
//!
//! Every stochastic operation takes an injected [`rand::Rng`] and derives a
//! freshly seeded child generator from it with [`reseed`], so a run is fully
//! reproducible from a single seed.

pub mod generation;
pub mod assignment;
pub mod estimation;

// Re-export commonly used items
pub use generation::*;
pub use assignment::*;
pub use estimation::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Derive a new, independently seeded generator from `rng`
pub fn reseed<R: Rng + ?Sized>(rng: &mut R) -> StdRng {
    StdRng::seed_from_u64(rng.gen())
}
