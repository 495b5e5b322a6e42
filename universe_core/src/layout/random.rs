//! Deterministic pseudo-random numbers keyed by a string.
//!
//! The seed is hashed over UTF-16 code units with the usual `h * 31 + c`
//! string hash, then fed to a small LCG. Both steps use fixed-width integer
//! arithmetic so the sequence matches across platforms and across other
//! implementations of the same recipe.

use std::f32::consts::TAU;

const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_MODULUS: u64 = 233_280;

#[derive(Clone, Debug)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    pub fn new(seed: &str) -> Self {
        Self {
            state: u64::from(hash_seed(seed)),
        }
    }

    /// Next value in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        (self.state as f64 / LCG_MODULUS as f64) as f32
    }

    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }

    /// Standard normal sample via Box–Muller.
    pub fn gaussian(&mut self) -> f32 {
        // 1 - u keeps the log argument in (0, 1].
        let u1 = 1.0 - self.next_f32();
        let u2 = self.next_f32();
        (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
    }
}

/// 32-bit string hash, returned as its absolute value.
pub fn hash_seed(seed: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in seed.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    hash.unsigned_abs()
}
