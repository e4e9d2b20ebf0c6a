//! Recording [`Canvas`] that flattens drawing into GPU-ready triangle batches.

use glam::{Affine2, Vec2};

use super::path::Path;
use super::stroke::stroke_triangles;
use super::text::layout_text;
use super::{Canvas, CompositeOp, LineCap, Rgba};

/// How an item's triangles mark coverage in the stencil buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StencilMode {
    /// Nonzero winding: front faces increment, back faces decrement
    NonZero,
    /// Any covering triangle marks the pixel
    Coverage,
}

/// One paint operation: covered area, color and blend mode
#[derive(Debug, Clone)]
pub struct DrawItem {
    pub composite: CompositeOp,
    pub stencil: StencilMode,
    pub color: Rgba,
    /// Device-space triangles, three points each
    pub triangles: Vec<Vec2>,
}

impl DrawItem {
    /// Axis-aligned bounds of the covered area
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let first = *self.triangles.first()?;
        Some(
            self.triangles
                .iter()
                .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p))),
        )
    }
}

/// Drawing state saved and restored as a unit
#[derive(Debug, Clone)]
struct DrawState {
    transform: Affine2,
    fill: Rgba,
    stroke: Rgba,
    line_width: f32,
    line_cap: LineCap,
    composite: CompositeOp,
    font_px: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            fill: Rgba::BLACK,
            stroke: Rgba::BLACK,
            line_width: 1.0,
            line_cap: LineCap::Butt,
            composite: CompositeOp::SourceOver,
            font_px: 10.0,
        }
    }
}

/// A frame's worth of drawing, in paint order
pub struct DisplayList {
    width: f32,
    height: f32,
    state: DrawState,
    stack: Vec<DrawState>,
    path: Path,
    items: Vec<DrawItem>,
}

impl DisplayList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            state: DrawState::default(),
            stack: Vec::new(),
            path: Path::new(),
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    fn point(&self, x: f32, y: f32) -> Vec2 {
        self.state.transform.transform_point2(Vec2::new(x, y))
    }

    fn push(&mut self, color: Rgba, stencil: StencilMode, triangles: Vec<Vec2>) {
        if color.is_transparent() || triangles.is_empty() {
            return;
        }
        self.items.push(DrawItem {
            composite: self.state.composite,
            stencil,
            color,
            triangles,
        });
    }

    fn text_cells(&self, text: &str, x: f32, y: f32) -> super::TextCells {
        layout_text(text, x, y, self.state.font_px)
    }
}

impl Canvas for DisplayList {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.state.transform = self.state.transform * Affine2::from_translation(Vec2::new(x, y));
    }

    fn rotate(&mut self, radians: f32) {
        self.state.transform = self.state.transform * Affine2::from_angle(radians);
    }

    fn set_fill(&mut self, color: Rgba) {
        self.state.fill = color;
    }

    fn set_stroke(&mut self, color: Rgba) {
        self.state.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        // Canvas ignores non-positive and non-finite widths
        if width > 0.0 && width.is_finite() {
            self.state.line_width = width;
        }
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    fn set_composite(&mut self, op: CompositeOp) {
        self.state.composite = op;
    }

    fn set_font_px(&mut self, px: f32) {
        if px > 0.0 && px.is_finite() {
            self.state.font_px = px;
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.line_to(p);
    }

    fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32) {
        let p1 = self.point(x1, y1);
        let p2 = self.point(x2, y2);
        self.path.arc_to(p1, p2, radius);
    }

    fn stroke(&mut self) {
        let mut triangles = Vec::new();
        stroke_triangles(
            &self.path,
            self.state.line_width,
            self.state.line_cap,
            &mut triangles,
        );
        self.push(self.state.stroke, StencilMode::NonZero, triangles);
    }

    fn fill(&mut self) {
        let mut triangles = Vec::new();
        self.path.fill_triangles(&mut triangles);
        self.push(self.state.fill, StencilMode::NonZero, triangles);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let a = self.point(x, y);
        let b = self.point(x + w, y);
        let c = self.point(x + w, y + h);
        let d = self.point(x, y + h);
        self.push(self.state.fill, StencilMode::NonZero, vec![a, b, c, a, c, d]);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        let cells = self.text_cells(text, x, y);
        let mut triangles = Vec::with_capacity(cells.lit.len() * 6);
        for &(col, row) in &cells.lit {
            let a = self.state.transform.transform_point2(cells.corner(col, row));
            let b = self.state.transform.transform_point2(cells.corner(col + 1, row));
            let c = self.state.transform.transform_point2(cells.corner(col + 1, row + 1));
            let d = self.state.transform.transform_point2(cells.corner(col, row + 1));
            triangles.extend_from_slice(&[a, b, c, a, c, d]);
        }
        self.push(self.state.fill, StencilMode::Coverage, triangles);
    }

    fn stroke_text(&mut self, text: &str, x: f32, y: f32) {
        let cells = self.text_cells(text, x, y);
        let mut edges = Path::new();
        for (a, b) in cells.outline() {
            edges.move_to(self.state.transform.transform_point2(a));
            edges.line_to(self.state.transform.transform_point2(b));
        }
        let mut triangles = Vec::new();
        stroke_triangles(&edges, self.state.line_width, LineCap::Square, &mut triangles);
        self.push(self.state.stroke, StencilMode::NonZero, triangles);
    }
}
