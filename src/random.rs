//! Seeded random stream construction.
//!
//! Every run draws from one [`StdRng`] so the sequence of outcomes is a
//! function of the seed and the order in which strategies consume it.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates the run's random stream from a fixed seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Resolves an optional seed, drawing one from entropy when absent.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}
