//! Spatialized tick playback.
//!
//! The clock talks to audio through [`AudioEngine`]: start a one-shot voice
//! from a preloaded sample, and schedule gain ramps on voices already
//! playing. [`AudioSystem`] implements it on a kira `AudioManager` with a
//! spatial scene placing each voice around the listener.

mod samples;
mod system;
mod tick;

pub use samples::SampleBank;
pub use system::{detune_rate, ramp_tween, AudioSystem};
pub use tick::{PannerOrbit, TickDecision, TickEngine, TickVoice};

use glam::Vec3;

/// Handle to a started voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoiceId(pub u64);

/// Everything needed to start one sample voice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceRequest {
    /// Index into the loaded sample set
    pub sample_index: usize,

    /// Playback start position within the buffer (seconds)
    pub start_offset: f64,

    /// Pitch shift (cents); also shifts playback speed
    pub detune_cents: f32,

    /// Source position relative to the listener (meters)
    pub position: Vec3,

    /// Gain at start time (linear)
    pub initial_gain: f32,
}

/// Scheduled gain change, starting from the voice's current gain
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GainRamp {
    Linear { value: f32, end_time: f64 },
    Exponential { value: f32, end_time: f64 },
}

/// Audio graph as seen by the tick engine
pub trait AudioEngine {
    /// Audio clock (seconds since the output started)
    fn current_time(&self) -> f64;

    /// Number of loaded samples
    fn sample_count(&self) -> usize;

    /// Length of a loaded sample (seconds)
    fn sample_duration(&self, index: usize) -> f64;

    /// Start a voice now; it plays to the end of its buffer then stops
    fn start_voice(&mut self, request: VoiceRequest) -> VoiceId;

    /// Schedule a ramp on a voice; ignored if the voice has already ended
    fn ramp_gain(&mut self, voice: VoiceId, ramp: GainRamp);
}
