//! Path construction on `kurbo` curves, flattened for triangulation.

use glam::Vec2;
use kurbo::{Arc, BezPath, PathEl, Point};
use std::f64::consts::PI;

/// Maximum distance between a curve and its flattened polyline (pixels)
pub const TOLERANCE: f64 = 0.1;

/// Points closer than this are treated as coincident (pixels)
const EPSILON: f64 = 1e-4;

/// A set of open subpaths in device coordinates
#[derive(Debug, Clone, Default)]
pub struct Path {
    bez: BezPath,
    current: Option<Point>,
}

fn point(p: Vec2) -> Point {
    Point::new(f64::from(p.x), f64::from(p.y))
}

fn vec2(p: Point) -> Vec2 {
    Vec2::new(p.x as f32, p.y as f32)
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing curve path (e.g. a stroke outline)
    pub fn from_bez(bez: BezPath) -> Self {
        let current = bez.elements().last().and_then(PathEl::end_point);
        Self { bez, current }
    }

    pub fn clear(&mut self) {
        self.bez = BezPath::new();
        self.current = None;
    }

    pub fn as_bez(&self) -> &BezPath {
        &self.bez
    }

    pub fn is_empty(&self) -> bool {
        self.bez.elements().is_empty()
    }

    pub fn current_point(&self) -> Option<Vec2> {
        self.current.map(vec2)
    }

    pub fn move_to(&mut self, p: Vec2) {
        self.move_to_point(point(p));
    }

    /// Without a current point this starts a new subpath at `p`
    pub fn line_to(&mut self, p: Vec2) {
        self.line_to_point(point(p));
    }

    fn move_to_point(&mut self, p: Point) {
        self.bez.move_to(p);
        self.current = Some(p);
    }

    fn line_to_point(&mut self, p: Point) {
        if self.current.is_none() {
            self.move_to_point(p);
            return;
        }
        self.bez.line_to(p);
        self.current = Some(p);
    }

    /// Canvas `arcTo`: a line to the first tangent point, then a circular arc
    /// of `radius` ending at the second tangent point.
    ///
    /// Radius is in device pixels; callers only apply rigid transforms, so it
    /// does not need rescaling.
    pub fn arc_to(&mut self, p1: Vec2, p2: Vec2, radius: f32) {
        let (p1, p2, radius) = (point(p1), point(p2), f64::from(radius));
        let Some(p0) = self.current else {
            self.move_to_point(p1);
            return;
        };

        let v0 = p0 - p1;
        let v2 = p2 - p1;
        let (len0, len2) = (v0.hypot(), v2.hypot());
        if radius <= 0.0 || len0 < EPSILON || len2 < EPSILON {
            self.line_to_point(p1);
            return;
        }

        let u0 = v0 / len0;
        let u2 = v2 / len2;
        if u0.cross(u2).abs() < 1e-9 {
            // Collinear
            self.line_to_point(p1);
            return;
        }

        let half_theta = u0.dot(u2).clamp(-1.0, 1.0).acos() / 2.0;
        let tangent_len = radius / half_theta.tan();
        let t0 = p1 + u0 * tangent_len;
        let t2 = p1 + u2 * tangent_len;
        let center = p1 + (u0 + u2).normalize() * (radius / half_theta.sin());

        self.line_to_point(t0);

        let start_angle = (t0 - center).atan2();
        let arc = Arc {
            center,
            radii: kurbo::Vec2::new(radius, radius),
            start_angle,
            sweep_angle: shortest_sweep(start_angle, (t2 - center).atan2()),
            x_rotation: 0.0,
        };
        self.bez.extend(arc.append_iter(TOLERANCE));
        self.current = Some(t2);
    }

    /// Every subpath flattened to a polyline
    pub fn polylines(&self) -> Vec<Vec<Vec2>> {
        let mut lines: Vec<Vec<Vec2>> = Vec::new();
        kurbo::flatten(&self.bez, TOLERANCE, |el| match el {
            PathEl::MoveTo(p) => lines.push(vec![vec2(p)]),
            PathEl::LineTo(p) => {
                if let Some(line) = lines.last_mut() {
                    line.push(vec2(p));
                }
            }
            _ => {}
        });
        lines
    }

    /// Fan triangles of every subpath, for nonzero stencil filling
    pub fn fill_triangles(&self, out: &mut Vec<Vec2>) {
        for line in self.polylines() {
            if line.len() < 3 {
                continue;
            }
            let anchor = line[0];
            for pair in line[1..].windows(2) {
                out.extend_from_slice(&[anchor, pair[0], pair[1]]);
            }
        }
    }
}

/// Signed angle from `from` to `to` in `(-π, π]`
fn shortest_sweep(from: f64, to: f64) -> f64 {
    let mut delta = (to - from) % (2.0 * PI);
    if delta > PI {
        delta -= 2.0 * PI;
    } else if delta <= -PI {
        delta += 2.0 * PI;
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2 as v;

    #[test]
    fn test_line_to_without_current_point_starts_subpath() {
        let mut path = Path::new();
        path.line_to(v(3.0, 4.0));
        assert_eq!(path.polylines().len(), 1);
        assert_eq!(path.current_point(), Some(v(3.0, 4.0)));
    }

    #[test]
    fn test_arc_to_without_current_point_moves() {
        let mut path = Path::new();
        path.arc_to(v(1.0, 1.0), v(5.0, 1.0), 2.0);
        assert_eq!(path.polylines(), vec![vec![v(1.0, 1.0)]]);
    }

    #[test]
    fn test_arc_to_degenerate_cases_draw_line() {
        // Current point equals the corner
        let mut path = Path::new();
        path.move_to(v(1.0, 1.0));
        path.arc_to(v(1.0, 1.0), v(5.0, 5.0), 2.0);
        assert_eq!(path.polylines(), vec![vec![v(1.0, 1.0), v(1.0, 1.0)]]);

        // Collinear
        let mut path = Path::new();
        path.move_to(v(0.0, 0.0));
        path.arc_to(v(5.0, 0.0), v(10.0, 0.0), 2.0);
        assert_eq!(path.current_point(), Some(v(5.0, 0.0)));

        // Zero radius
        let mut path = Path::new();
        path.move_to(v(0.0, 0.0));
        path.arc_to(v(5.0, 0.0), v(5.0, 5.0), 0.0);
        assert_eq!(path.current_point(), Some(v(5.0, 0.0)));
    }

    #[test]
    fn test_arc_to_rounds_right_angle_corner() {
        let mut path = Path::new();
        path.move_to(v(0.0, 0.0));
        path.arc_to(v(10.0, 0.0), v(10.0, 10.0), 2.0);

        let points = &path.polylines()[0];
        // Line to the first tangent point
        assert!((points[1] - v(8.0, 0.0)).length() < 1e-4);
        // Ends on the second tangent point, not at p2
        assert!((path.current_point().unwrap() - v(10.0, 2.0)).length() < 1e-4);
        assert!((*points.last().unwrap() - v(10.0, 2.0)).length() < 1e-3);
        assert!(points.len() > 3);

        // Every flattened arc vertex lies near the circle around (8, 2)
        for p in &points[1..] {
            assert!(((*p - v(8.0, 2.0)).length() - 2.0).abs() < 2.0 * TOLERANCE as f32);
        }
    }

    #[test]
    fn test_fill_triangles_fan_each_subpath() {
        let mut path = Path::new();
        path.move_to(v(0.0, 0.0));
        path.line_to(v(4.0, 0.0));
        path.line_to(v(4.0, 4.0));
        path.line_to(v(0.0, 4.0));
        // Too short to enclose anything
        path.move_to(v(9.0, 9.0));
        path.line_to(v(10.0, 9.0));

        let mut out = Vec::new();
        path.fill_triangles(&mut out);
        assert_eq!(out.len(), 6);
        assert_eq!(&out[..3], &[v(0.0, 0.0), v(4.0, 0.0), v(4.0, 4.0)]);
    }

    #[test]
    fn test_clear_forgets_current_point() {
        let mut path = Path::new();
        path.move_to(v(1.0, 2.0));
        path.clear();
        assert!(path.is_empty());
        assert_eq!(path.current_point(), None);
    }

    #[test]
    fn test_shortest_sweep_wraps() {
        assert!((shortest_sweep(3.0, -3.0) - (2.0 * PI - 6.0)).abs() < 1e-9);
        assert!((shortest_sweep(-3.0, 3.0) + (2.0 * PI - 6.0)).abs() < 1e-9);
        assert!((shortest_sweep(0.5, 1.0) - 0.5).abs() < 1e-12);
    }
}
