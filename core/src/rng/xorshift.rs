//! xorshift64* random number generator
//!
//! This is a fast, high-quality PRNG that is deterministic and suitable
//! for simulation purposes.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers. Every bounded draw consumes
//! exactly one raw draw of the underlying engine, so the *order* of draws
//! across the generation phases is part of the observable contract: two runs
//! with the same seed replay the same workload bit for bit.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use placement_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(125);
/// let value = rng.next();
/// let draw = rng.range_inclusive(0, 4); // [0, 4], bounds inclusive
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed is replaced by 1 (xorshift requires nonzero state).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Reset the generator to the start of the sequence for `seed`
    ///
    /// Equivalent to constructing a fresh generator; used when one shared
    /// generator instance is reused across runs.
    pub fn reseed(&mut self, seed: u64) {
        self.state = if seed == 0 { 1 } else { seed };
    }

    /// Generate next random u64 value
    ///
    /// This advances the internal state and returns a random value.
    pub fn next(&mut self) -> u64 {
        // xorshift64* algorithm
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate random value in range [low, high], both bounds inclusive
    ///
    /// Reversed bounds are swapped rather than rejected. The draw is uniform
    /// over the `high - low + 1` values and consumes exactly one call to
    /// [`next`](Self::next) regardless of the span.
    ///
    /// # Example
    /// ```
    /// use placement_simulator_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(125);
    /// let size = rng.range_inclusive(20, 50);
    /// assert!(size >= 20 && size <= 50);
    /// ```
    pub fn range_inclusive(&mut self, low: i64, high: i64) -> i64 {
        let (low, high) = if low > high { (high, low) } else { (low, high) };

        let span = (high - low) as u64 + 1;
        let offset = self.next() % span;
        low + offset as i64
    }

    /// Get current RNG state (for checkpointing/replay)
    pub fn state(&self) -> u64 {
        self.state
    }
}
