//! Stochastic tick triggering with continuation, crossfade and orbiting
//! spatialization.

use glam::Vec3;
use std::f64::consts::TAU;

use super::{AudioEngine, GainRamp, VoiceId, VoiceRequest};
use crate::params::TickParams;
use crate::random::RandomSource;

/// A voice started by the tick engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickVoice {
    pub id: VoiceId,
    pub sample_index: usize,

    /// Full length of the sample (seconds)
    pub buffer_duration: f64,

    /// Audio time of the fire that began the current run of this sample
    pub start_time: f64,

    /// Playback position the voice started from (seconds)
    pub start_offset: f64,

    pub detune_cents: f32,
    pub position: Vec3,
}

/// Outcome of one frame's tick evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickDecision {
    Idle,
    Fired(TickVoice),
}

/// Source position drifting around the listener, one step per fire
#[derive(Debug, Clone)]
pub struct PannerOrbit {
    /// Orbit phase on each axis (turns, 0..1)
    angle_x: f64,
    angle_y: f64,
    radius: f32,
    initial_depth: f32,
    position: Vec3,
}

impl PannerOrbit {
    pub fn new(params: &TickParams) -> Self {
        Self {
            angle_x: 0.0,
            angle_y: 0.0,
            radius: params.orbit_radius,
            initial_depth: params.initial_depth,
            position: Vec3::new(0.0, 0.0, params.initial_depth),
        }
    }

    /// Advance each phase by a random fraction of `max_step` turns.
    ///
    /// Depth shrinks from `initial_depth` at the centre to 0 at the orbit
    /// corner, so sources further out laterally come closer.
    pub fn step(&mut self, max_step: f64, rng: &mut impl RandomSource) -> Vec3 {
        self.angle_x = (self.angle_x + rng.next() * max_step) % 1.0;
        self.angle_y = (self.angle_y + rng.next() * max_step) % 1.0;

        let x = (TAU * self.angle_x).cos() as f32 * self.radius;
        let y = (TAU * self.angle_y).sin() as f32 * self.radius;
        let corner = (2.0 * self.radius * self.radius).sqrt();
        let spread = if corner > 0.0 {
            (x * x + y * y).sqrt() / corner
        } else {
            0.0
        };
        let z = self.initial_depth - self.initial_depth * spread;

        self.position = Vec3::new(x, y, z);
        self.position
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }
}

/// Decides per frame whether to fire a tick, and how.
///
/// Consecutive fires of the same sample while the previous one is still
/// within its buffer continue from where that run would be now instead of
/// restarting. Every fire fades the previous voice towards a low floor
/// over its remaining playback.
#[derive(Debug, Clone)]
pub struct TickEngine {
    params: TickParams,
    previous: Option<TickVoice>,
    /// Audio time of the most recent restart
    run_start: f64,
    /// Bend (cents) to apply to the next fired voice
    pitch_bend_cents: f32,
    orbit: PannerOrbit,
}

impl TickEngine {
    pub fn new(params: TickParams) -> Self {
        let orbit = PannerOrbit::new(&params);
        Self {
            params,
            previous: None,
            run_start: 0.0,
            pitch_bend_cents: 0.0,
            orbit,
        }
    }

    pub fn pitch_bend_cents(&self) -> f32 {
        self.pitch_bend_cents
    }

    /// Run one frame's evaluation.
    ///
    /// Always draws the fire value and a sample index; a fire additionally
    /// draws the next pitch bend and two orbit steps.
    pub fn evaluate(
        &mut self,
        audio: &mut impl AudioEngine,
        rng: &mut impl RandomSource,
    ) -> TickDecision {
        let fire = rng.next();
        let sample_index = rng.index(audio.sample_count());
        if fire <= self.params.threshold {
            return TickDecision::Idle;
        }

        let now = audio.current_time();
        let elapsed = now - self.run_start;

        // This fire plays the bend drawn by the previous one
        let detune_cents = self.pitch_bend_cents;
        self.pitch_bend_cents = (rng.signed() as f32 * self.params.pitch_bend_range_cents).trunc();

        let position = self.orbit.step(self.params.orbit_step, rng);

        if let Some(prev) = &self.previous {
            let remaining = prev.buffer_duration - elapsed;
            if remaining > 0.0 {
                audio.ramp_gain(
                    prev.id,
                    GainRamp::Exponential {
                        value: self.params.crossfade_floor,
                        end_time: now + remaining,
                    },
                );
            }
        }

        let continues = self.previous.as_ref().is_some_and(|prev| {
            elapsed < prev.buffer_duration && prev.sample_index == sample_index
        });
        let start_offset = if continues {
            elapsed
        } else {
            self.run_start = now;
            0.0
        };

        let id = audio.start_voice(VoiceRequest {
            sample_index,
            start_offset,
            detune_cents,
            position,
            initial_gain: 1.0,
        });
        let voice = TickVoice {
            id,
            sample_index,
            buffer_duration: audio.sample_duration(sample_index),
            start_time: self.run_start,
            start_offset,
            detune_cents,
            position,
        };

        log::debug!(
            "Tick: sample {} offset {:.3}s detune {} cents at ({:.2}, {:.2}, {:.2})",
            sample_index,
            start_offset,
            detune_cents,
            position.x,
            position.y,
            position.z
        );

        self.previous = Some(voice);
        TickDecision::Fired(voice)
    }
}
