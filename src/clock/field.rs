//! Damped random-walk field perturbing ring radii and glyph positions.

use std::f64::consts::TAU;

use crate::params::FieldParams;
use crate::random::RandomSource;

/// Ring of scalar offsets evolving as `v = damping * v + step * A * (2r - 1)`
#[derive(Debug, Clone)]
pub struct RandomWalkField {
    values: Vec<f32>,
    damping: f32,
    step_scale: f32,
    /// Number of `advance` calls so far
    generation: u64,
}

impl RandomWalkField {
    /// Field with every value drawn uniformly in `[-1, 1)`
    pub fn new(params: &FieldParams, rng: &mut impl RandomSource) -> Self {
        let values = (0..params.resolution)
            .map(|_| rng.signed() as f32)
            .collect();
        Self {
            values,
            damping: params.damping,
            step_scale: params.step_scale,
            generation: 0,
        }
    }

    /// Take one random-walk step on every value
    pub fn advance(&mut self, amplitude: f32, rng: &mut impl RandomSource) {
        for v in &mut self.values {
            *v = self.damping * *v + self.step_scale * amplitude * rng.signed() as f32;
        }
        self.generation += 1;
    }

    pub fn value_at(&self, index: usize) -> f32 {
        self.values[index % self.values.len()]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Noise amplitude for a frame: `base * (1 + sin²(elapsed * rate * 2π))`
pub fn noise_amplitude(params: &FieldParams, elapsed_ms: f64) -> f32 {
    let s = (elapsed_ms * params.amplitude_rate_per_ms * TAU).sin();
    params.amplitude_base * (1.0 + (s * s) as f32)
}
