//! Adapter from a `rand` generator to [`UniformSource`].
//!
//! The engine only needs a linear stream of uniform draws. [`RngSource`]
//! wraps any [`Rng`] to provide one; [`RngSource::seeded`] builds the
//! default ChaCha8 stream so a seed fully determines a run.

use flatperm_core::UniformSource;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A [`UniformSource`] backed by a `rand` generator.
#[derive(Clone, Debug)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Unwrap the generator.
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngSource<ChaCha8Rng> {
    /// Deterministic ChaCha8 stream from a 64-bit seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> UniformSource for RngSource<R> {
    fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn index(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }
}
