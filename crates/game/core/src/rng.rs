//! Seedable random source threaded through every roll of a fight.
//!
//! The engine never touches a global RNG: crit/miss rolls, confusion outcomes,
//! initiative coin flips and scripted picks all draw from the [`FightRng`]
//! owned by the fight. Given the same seed, a fight replays identically.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Fight random number generator.
///
/// Wraps [`ChaCha8Rng`] so every consumer goes through the same small,
/// auditable set of helpers.
#[derive(Debug, Clone)]
pub struct FightRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl FightRng {
    /// Create a new RNG with the given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed.
    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }

    /// Seed this generator was created from (for replaying a fight).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform roll in `[0, 100)`.
    pub fn roll_percent(&mut self) -> f64 {
        self.rng.gen_range(0.0..100.0)
    }

    /// Returns true with the given probability (`0.0..=1.0`).
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Uniform value in `[low, high]`.
    pub fn range_f64(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    /// Fair coin flip.
    pub fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    /// Uniform pick from a slice. `None` if empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Weighted pick, returning the chosen index.
    ///
    /// Returns `None` when the slice is empty or every weight is zero.
    pub fn weighted_pick(&mut self, weights: &[u32]) -> Option<usize> {
        let dist = WeightedIndex::new(weights).ok()?;
        Some(dist.sample(&mut self.rng))
    }
}

impl Default for FightRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
