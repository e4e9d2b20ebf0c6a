//! The noise clock: per-frame evolution and drawing of the face.
//!
//! Each frame, in order:
//! 1. Evaluate the tick engine (may start a sample voice)
//! 2. Paint a translucent background over the previous frame (trails)
//! 3. Compute the noise amplitude from elapsed time
//! 4. Draw the rings, evolving the field once per ring
//! 5. Draw the hour labels, stepping each slot's blink counter
//! 6. Draw the two hands

mod blink;
mod field;
mod glyphs;
mod hands;
mod rings;

pub use blink::{BlinkStates, HOUR_SLOTS};
pub use field::{noise_amplitude, RandomWalkField};
pub use glyphs::{glitch_label, hour_for_slot, render_glyphs, slot_jitter};
pub use hands::{hand_angle, render_hand, render_hands};
pub use rings::{render_ring, render_rings, RingTrace};

use std::f64::consts::{FRAC_PI_4, TAU};

use crate::audio::{AudioEngine, TickDecision, TickEngine};
use crate::canvas::{Canvas, CompositeOp, LineCap, Rgba};
use crate::params::{ClockParams, TickParams};
use crate::random::RandomSource;

/// Trail color painted over the whole canvas before each frame
pub fn background_color(elapsed_ms: f64) -> Rgba {
    let t = elapsed_ms * TAU;
    Rgba::new(
        ((1.0 + (t * 1e-4).sin()) * 20.0 + 10.0) as f32,
        0.0,
        ((1.0 + (t * 5e-5).cos()) * 5.0 + 10.0) as f32,
        ((1.0 + (FRAC_PI_4 + t * 4.5e-5).sin()) * 0.235) as f32,
    )
}

/// Everything that persists from one frame to the next
#[derive(Debug, Clone)]
pub struct ClockEngineState {
    pub field: RandomWalkField,
    pub blinks: BlinkStates,
    pub ticks: TickEngine,

    /// Timestamp of the first frame (ms)
    pub start_ms: Option<f64>,
}

/// What a single frame did
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub elapsed_ms: f64,
    pub amplitude: f32,
    pub tick: TickDecision,
    pub rings: Vec<RingTrace>,
    pub glitched: [bool; HOUR_SLOTS],
}

/// Audio-reactive clock face
pub struct NoiseClock {
    params: ClockParams,
    state: ClockEngineState,
}

impl NoiseClock {
    pub fn new(params: ClockParams, tick_params: TickParams, rng: &mut impl RandomSource) -> Self {
        let state = ClockEngineState {
            field: RandomWalkField::new(&params.field, rng),
            blinks: BlinkStates::new(&params.glyphs.blink),
            ticks: TickEngine::new(tick_params),
            start_ms: None,
        };
        Self { params, state }
    }

    pub fn state(&self) -> &ClockEngineState {
        &self.state
    }

    /// Advance and draw one frame at `timestamp_ms`.
    ///
    /// The first call fixes the clock's start time; all animation runs on
    /// time elapsed since then.
    pub fn frame(
        &mut self,
        timestamp_ms: f64,
        canvas: &mut impl Canvas,
        audio: &mut impl AudioEngine,
        rng: &mut impl RandomSource,
    ) -> FrameReport {
        let start = *self.state.start_ms.get_or_insert(timestamp_ms);
        let elapsed_ms = timestamp_ms - start;

        let tick = self.state.ticks.evaluate(audio, rng);

        let (width, height) = (canvas.width(), canvas.height());
        canvas.set_fill(background_color(elapsed_ms));
        canvas.fill_rect(0.0, 0.0, width, height);

        let amplitude = noise_amplitude(&self.params.field, elapsed_ms);
        let radius = self.params.radius(width, height);

        // Rings and labels share one path: the closing stroke re-outlines
        // every ring contour
        let rings = &self.params.rings;
        canvas.save();
        canvas.set_stroke(rings.stroke);
        canvas.set_composite(CompositeOp::SoftLight);
        canvas.set_line_cap(LineCap::Round);
        canvas.translate(width / 2.0, height / 2.0);
        canvas.begin_path();
        canvas.set_line_width(rings.line_width);

        let ring_traces = render_rings(canvas, &mut self.state.field, rings, radius, amplitude, rng);
        let glitched = render_glyphs(
            canvas,
            &self.state.field,
            &mut self.state.blinks,
            &self.params.glyphs,
            radius,
            elapsed_ms,
            rng,
        );
        canvas.stroke();
        canvas.restore();

        render_hands(canvas, &self.params.hands, radius, elapsed_ms, rng);

        FrameReport {
            elapsed_ms,
            amplitude,
            tick,
            rings: ring_traces,
            glitched,
        }
    }
}
