//! Jittery clock hands rotating at fixed rates.

use std::f64::consts::PI;

use crate::canvas::{Canvas, CompositeOp};
use crate::params::{HandParams, HandSpec};
use crate::random::RandomSource;

/// Rotation of a hand after `elapsed_ms` (radians, clockwise)
pub fn hand_angle(elapsed_ms: f64, frequency: f64) -> f32 {
    (PI * elapsed_ms * frequency) as f32
}

/// Draw the slow hand then the fast hand.
///
/// Both hands share one length perturbation drawn at the start of the frame.
pub fn render_hands(
    canvas: &mut impl Canvas,
    params: &HandParams,
    radius: f32,
    elapsed_ms: f64,
    rng: &mut impl RandomSource,
) {
    let noise = rng.signed() as f32;
    for spec in [&params.slow, &params.fast] {
        let length = radius * spec.radius_fraction + spec.radius_noise * noise;
        render_hand(canvas, params, spec, length, elapsed_ms, rng);
    }
}

/// One hand: a polyline from the centre with random lateral offsets
pub fn render_hand(
    canvas: &mut impl Canvas,
    params: &HandParams,
    spec: &HandSpec,
    length: f32,
    elapsed_ms: f64,
    rng: &mut impl RandomSource,
) {
    canvas.save();
    canvas.set_composite(CompositeOp::ColorDodge);
    canvas.set_stroke(params.color);
    canvas.set_line_width(params.line_width);
    let (cx, cy) = (canvas.width() / 2.0, canvas.height() / 2.0);
    canvas.translate(cx, cy);
    canvas.rotate(hand_angle(elapsed_ms, spec.frequency));

    canvas.begin_path();
    canvas.move_to(0.0, 0.0);
    let divisions = (params.segments + 1) as f32;
    for i in 0..params.segments {
        let along = length * (i + 1) as f32 / divisions;
        canvas.line_to(along, rng.next() as f32 * params.lateral_jitter);
    }
    canvas.stroke();
    canvas.restore();
}
