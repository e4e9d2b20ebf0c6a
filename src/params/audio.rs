//! Tick engine configuration and sample assets.

/// Directory holding the tick samples, relative to the working directory
pub const SAMPLE_DIR: &str = "assets/audio";

/// One-shot tick samples, loaded in this order (sample index = position)
pub const TICK_SAMPLE_FILES: [&str; 11] = [
    "Ti To-001.wav",
    "Ti To-002.wav",
    "Ti To-003.wav",
    "Ti To-004.wav",
    "Ti To-005.wav",
    "Ti To-006.wav",
    "Ti To-007.wav",
    "Ti To-008.wav",
    "Tickle Tockle (low 1 comp).wav",
    "01-210709_2012-glued.wav",
    "Tickle Tockle (arcade comp).wav",
];

/// Tick triggering, crossfade and spatialization
#[derive(Debug, Clone)]
pub struct TickParams {
    /// A tick fires when the per-frame draw exceeds this (0..1)
    /// At 60 fps, 0.997 ≈ one tick every ~5.5 s
    pub threshold: f64,

    /// Pitch bend drawn uniformly in ±this (cents)
    pub pitch_bend_range_cents: f32,

    /// Gain the superseded voice ramps down to (linear, must be > 0)
    pub crossfade_floor: f32,

    /// Maximum orbit advance per fire on each axis (turns)
    pub orbit_step: f64,

    /// Orbit radius on X and Y (meters)
    pub orbit_radius: f32,

    /// Depth of a source at the orbit centre (meters); shrinks to 0 at the rim
    pub initial_depth: f32,
}

impl Default for TickParams {
    fn default() -> Self {
        Self {
            threshold: 0.997,
            pitch_bend_range_cents: 2400.0, // two octaves each way
            crossfade_floor: 0.03,
            orbit_step: 0.1,
            orbit_radius: 1.0,
            initial_depth: 4.0,
        }
    }
}
