//! Per-decision deterministic uniform generator.
//!
//! A [`DecisionRng`] is constructed fresh from the salted seed for every decision and holds
//! no state shared across decisions or threads. Same seed + same call sequence produces
//! bit-identical draws within one build; matching any particular PRNG bit-stream across
//! implementations is explicitly not a goal, only determinism and uniformity are.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded uniform generator for a single decision.
#[derive(Debug, Clone)]
pub struct DecisionRng {
    rng: StdRng,
}

impl DecisionRng {
    /// Construct from a salted per-decision seed (see [`crate::salted_seed`]).
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform draw in `[0, 1)`.
    pub fn uniform_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform integer in `[lo, hi]`, both ends inclusive.
    ///
    /// # Panics
    ///
    /// Panics if `lo > hi` (caller bug; explorers only call this with validated `n >= 1`).
    pub fn uniform_int(&mut self, lo: u32, hi: u32) -> u32 {
        self.rng.random_range(lo..=hi)
    }
}
