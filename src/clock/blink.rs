//! Per-slot glitch counters for the hour labels.

use crate::params::BlinkParams;

/// Number of hour slots on the dial
pub const HOUR_SLOTS: usize = 12;

/// Glitch counters, one per hour slot.
///
/// A counter of 0 means the slot renders normally. A triggered slot counts
/// up by one per frame, modulo `num_frames`, and is glitched on every frame
/// until the counter wraps back to 0.
#[derive(Debug, Clone)]
pub struct BlinkStates {
    counters: [u32; HOUR_SLOTS],
    threshold: f64,
    num_frames: u32,
}

impl BlinkStates {
    pub fn new(params: &BlinkParams) -> Self {
        Self {
            counters: [0; HOUR_SLOTS],
            threshold: params.threshold,
            num_frames: params.num_frames.max(1),
        }
    }

    /// Evaluate one slot for this frame.
    ///
    /// `draw` is the slot's uniform draw; `eligible` is whether the slot's
    /// label may glitch at all. Returns true if the slot renders glitched.
    pub fn step(&mut self, slot: usize, draw: f64, eligible: bool) -> bool {
        let counter = &mut self.counters[slot];
        let in_window = *counter > 0;
        if eligible && (draw > self.threshold || in_window) {
            *counter = (*counter + 1) % self.num_frames;
            true
        } else {
            false
        }
    }

    pub fn counter(&self, slot: usize) -> u32 {
        self.counters[slot]
    }
}
