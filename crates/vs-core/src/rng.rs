//! Deterministic run-level RNG wrapper.
//!
//! One `SimRng` per run, seeded from [`SimParams::seed`][crate::SimParams].
//! It lives inside the population lock in `vs-sim`, so draws are serialized
//! with the state they act on and a run replays exactly for a given seed
//! and sequence of manual contacts.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level RNG.
///
/// Used only in single-threaded or explicitly synchronised contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset, useful for
    /// giving an auxiliary stream (e.g. a demo's contact generator) its own
    /// reproducible sequence.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` APIs
    /// (`propagate(.., rng.inner())`, `slice.partial_shuffle(rng.inner(), k)`).
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
