//! Injected randomness.
//!
//! All stochastic content of a frame (field steps, blink and tick draws, hand
//! jitter, orbit steps) is pulled from one [`RandomSource`], so tests can
//! replace it with a scripted sequence.

use rand::rngs::ThreadRng;
use rand::Rng;

/// Source of uniform draws in `[0, 1)`
pub trait RandomSource {
    fn next(&mut self) -> f64;

    /// Uniform draw in `[-1, 1)`
    fn signed(&mut self) -> f64 {
        2.0 * self.next() - 1.0
    }

    /// Uniform index in `0..len`; 0 when `len` is 0
    fn index(&mut self, len: usize) -> usize {
        ((self.next() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

/// Unseeded thread-local generator
#[derive(Default)]
pub struct ThreadRandom {
    rng: ThreadRng,
}

impl ThreadRandom {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl RandomSource for ThreadRandom {
    fn next(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}
