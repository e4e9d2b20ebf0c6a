//! Stroke outlines.
//!
//! `kurbo::stroke` turns a path into the closed outline of its stroke; the
//! outline is filled with the nonzero rule like any other path.

use glam::Vec2;
use kurbo::{Cap, Join, Stroke, StrokeOpts};

use super::path::{Path, TOLERANCE};
use super::LineCap;

/// Canvas default `miterLimit`
const MITER_LIMIT: f64 = 10.0;

fn kurbo_cap(cap: LineCap) -> Cap {
    match cap {
        LineCap::Butt => Cap::Butt,
        LineCap::Round => Cap::Round,
        LineCap::Square => Cap::Square,
    }
}

/// Outline of `path` stroked at `width` with miter joins
pub fn stroke_outline(path: &Path, width: f32, cap: LineCap) -> Path {
    if width <= 0.0 || path.is_empty() {
        return Path::new();
    }
    let style = Stroke::new(f64::from(width))
        .with_caps(kurbo_cap(cap))
        .with_join(Join::Miter)
        .with_miter_limit(MITER_LIMIT);
    Path::from_bez(kurbo::stroke(
        path.as_bez().iter(),
        &style,
        &StrokeOpts::default(),
        TOLERANCE,
    ))
}

/// Triangles covering the stroke of `path`
pub fn stroke_triangles(path: &Path, width: f32, cap: LineCap, out: &mut Vec<Vec2>) {
    stroke_outline(path, width, cap).fill_triangles(out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    fn segment(a: Vec2, b: Vec2) -> Path {
        let mut path = Path::new();
        path.move_to(a);
        path.line_to(b);
        path
    }

    fn x_extent(points: &[Vec2]) -> (f32, f32) {
        points
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)))
    }

    #[test]
    fn test_butt_segment_stays_within_ends() {
        let mut out = Vec::new();
        stroke_triangles(&segment(vec2(0.0, 0.0), vec2(10.0, 0.0)), 4.0, LineCap::Butt, &mut out);
        assert!(!out.is_empty());
        assert_eq!(out.len() % 3, 0);

        // Outline spans ±2 around the segment and does not extend past its ends
        for p in &out {
            assert!(p.y.abs() <= 2.0 + 1e-4);
            assert!(p.x >= -1e-4 && p.x <= 10.0 + 1e-4);
        }
        assert!(out.iter().any(|p| (p.y - 2.0).abs() < 1e-4));
    }

    #[test]
    fn test_square_cap_extends_ends() {
        let mut out = Vec::new();
        stroke_triangles(&segment(vec2(0.0, 0.0), vec2(10.0, 0.0)), 4.0, LineCap::Square, &mut out);
        let (min_x, max_x) = x_extent(&out);
        assert!((min_x + 2.0).abs() < 1e-4);
        assert!((max_x - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_round_cap_bulges_past_ends() {
        let mut out = Vec::new();
        stroke_triangles(&segment(vec2(0.0, 0.0), vec2(10.0, 0.0)), 4.0, LineCap::Round, &mut out);
        let (min_x, max_x) = x_extent(&out);
        assert!(min_x < -1.5 && min_x >= -2.0 - 1e-3);
        assert!(max_x > 11.5 && max_x <= 12.0 + 1e-3);
    }

    #[test]
    fn test_degenerate_inputs() {
        let mut out = Vec::new();
        stroke_triangles(&segment(vec2(1.0, 1.0), vec2(5.0, 1.0)), 0.0, LineCap::Round, &mut out);
        assert!(out.is_empty());

        stroke_triangles(&Path::new(), 2.0, LineCap::Butt, &mut out);
        assert!(out.is_empty());
    }
}
