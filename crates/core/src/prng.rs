//! Seedable Xorshift64 generator for the one-off random draws of a render.
//!
//! The flow field itself is addressed through the stateless lattice hash; this
//! generator only supplies the values drawn once before the simulation loop
//! (the noise seed when none is given, and initial particle positions). Pure
//! integer state keeps the sequence identical across platforms.

use serde::{Deserialize, Serialize};

/// Xorshift64 deterministic PRNG with shifts (13, 7, 17).
///
/// A seed of 0 is replaced with a non-zero fallback, since all-zeros is a
/// fixed point of the algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in `[0, 1)` from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in `[min, max)`.
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform point in `[0, width) × [0, height)`; x is drawn first.
    pub fn next_point(&mut self, width: f64, height: f64) -> (f64, f64) {
        let x = self.next_range(0.0, width);
        let y = self.next_range(0.0, height);
        (x, y)
    }
}
