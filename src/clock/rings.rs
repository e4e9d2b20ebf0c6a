//! Concentric noise-perturbed contour rings.

use std::f32::consts::TAU;

use super::field::RandomWalkField;
use crate::canvas::Canvas;
use crate::params::RingParams;
use crate::random::RandomSource;

/// What one ring saw while it was drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingTrace {
    /// 1-based ring number
    pub ring: usize,
    /// `ring / num_circles + jitter`
    pub radius_scale: f32,
    /// Field generation the ring's radii were read from
    pub field_generation: u64,
}

/// Draw every ring, innermost first, offset by the field's first two values.
///
/// Expects the caller to have translated to the clock centre and begun a
/// path; the path is left holding every ring contour.
pub fn render_rings(
    canvas: &mut impl Canvas,
    field: &mut RandomWalkField,
    params: &RingParams,
    radius: f32,
    amplitude: f32,
    rng: &mut impl RandomSource,
) -> Vec<RingTrace> {
    canvas.save();
    canvas.translate(field.value_at(0), field.value_at(1));
    let traces = (1..=params.num_circles)
        .map(|ring| render_ring(canvas, field, ring, params, radius, amplitude, rng))
        .collect();
    canvas.restore();
    traces
}

/// Add one ring contour to the current path, then stroke and fill the path.
///
/// Advances `field` exactly once before reading it, so ring `k + 1` always
/// sees one more step of the walk than ring `k` within the same frame. The
/// path is not reset, so each fill repaints every contour added so far.
pub fn render_ring(
    canvas: &mut impl Canvas,
    field: &mut RandomWalkField,
    ring: usize,
    params: &RingParams,
    radius: f32,
    amplitude: f32,
    rng: &mut impl RandomSource,
) -> RingTrace {
    canvas.set_fill(if ring % 2 == 0 {
        params.fill_even
    } else {
        params.fill_odd
    });

    let radius_scale =
        ring as f32 / params.num_circles as f32 + rng.next() as f32 * params.radius_jitter;
    field.advance(amplitude, rng);

    let corner_radius = 1.0 + amplitude.tanh();
    let samples = field.len();
    let ring_radius = |i: usize| radius_scale * (radius + field.value_at(i));

    let mut last = (0.0, 0.0);
    for i in 0..samples {
        let to_angle = TAU * (i + 1) as f32 / samples as f32;
        let r = ring_radius(i);
        let next = (to_angle.cos() * r, to_angle.sin() * r);
        if i == 0 {
            canvas.move_to(r, 0.0);
        } else {
            canvas.arc_to(last.0, last.1, next.0, next.1, corner_radius);
        }
        last = next;
    }
    canvas.arc_to(last.0, last.1, ring_radius(0), 0.0, corner_radius);

    canvas.stroke();
    canvas.fill();

    RingTrace {
        ring,
        radius_scale,
        field_generation: field.generation(),
    }
}
