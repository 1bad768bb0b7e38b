//! Pluggable randomness for debug fills.

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of uniformly distributed indices.
///
/// Debug fills draw through this trait so tests can replay fixed sequences.
pub trait RandomSource {
    /// Return a value uniformly distributed in `[0, upper)`. `upper` is never zero.
    fn next_below(&mut self, upper: usize) -> usize;
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Reproducible generator for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_below(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }
}
