//! Random number generation for map synthesis.
//!
//! Uses a seeded ChaCha RNG so a given seed reproduces the same map.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Map random number generator.
///
/// Wraps ChaCha8Rng for reproducible generation runs.
#[derive(Debug, Clone)]
pub struct MapRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl MapRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns 0..n-1, or 0 if n is 0
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Uniform sample from [lo, hi). The range must be non-empty.
    pub fn span(&mut self, lo: usize, hi: usize) -> usize {
        self.rng.gen_range(lo..hi)
    }

    /// Uniform sample from [lo, hi) over i64. The range must be non-empty.
    pub fn span_i64(&mut self, lo: i64, hi: i64) -> i64 {
        self.rng.gen_range(lo..hi)
    }

    /// Uniform sample from [lo, hi) over f64
    pub fn span_f64(&mut self, lo: f64, hi: f64) -> f64 {
        self.rng.gen_range(lo..hi)
    }

    /// Uniform sample from [0, 1) as f32
    pub fn unit_f32(&mut self) -> f32 {
        self.rng.r#gen::<f32>()
    }
}

impl Default for MapRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
