//! 2D immediate-mode drawing interface.
//!
//! The clock draws exclusively through [`Canvas`], which mirrors a browser
//! canvas context: a current path built from move/line/arc-to commands, a
//! save/restore stack of drawing state, and stroke/fill/text painting.
//! [`DisplayList`] implements it by flattening everything into triangle
//! batches for the GPU renderer.

mod display_list;
mod path;
mod stroke;
mod text;

pub use display_list::{DisplayList, DrawItem, StencilMode};
pub use path::Path;
pub use text::{layout_text, TextCells};

/// Straight-alpha color with channels in `0..=1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::hex(0x000000ff);

    /// From 0..255 color channels and a 0..1 alpha
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: (r / 255.0).clamp(0.0, 1.0),
            g: (g / 255.0).clamp(0.0, 1.0),
            b: (b / 255.0).clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// From packed `0xRRGGBBAA`
    pub const fn hex(rgba: u32) -> Self {
        Self {
            r: ((rgba >> 24) & 0xff) as f32 / 255.0,
            g: ((rgba >> 16) & 0xff) as f32 / 255.0,
            b: ((rgba >> 8) & 0xff) as f32 / 255.0,
            a: (rgba & 0xff) as f32 / 255.0,
        }
    }

    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }
}

/// How painted pixels combine with what is already on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompositeOp {
    #[default]
    SourceOver,
    Screen,
    SoftLight,
    ColorDodge,
    Exclusion,
}

impl CompositeOp {
    pub const ALL: [CompositeOp; 5] = [
        CompositeOp::SourceOver,
        CompositeOp::Screen,
        CompositeOp::SoftLight,
        CompositeOp::ColorDodge,
        CompositeOp::Exclusion,
    ];
}

/// Stroke end style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Render surface consumed by the clock renderers.
///
/// Coordinates are in pixels, y pointing down, transformed by the current
/// translate/rotate state at the moment they are issued.
pub trait Canvas {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Push the drawing state (transform, styles, composite mode, font)
    fn save(&mut self);
    /// Pop the drawing state; no-op on an empty stack
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    /// Rotate clockwise by `radians` (y-down)
    fn rotate(&mut self, radians: f32);

    fn set_fill(&mut self, color: Rgba);
    fn set_stroke(&mut self, color: Rgba);
    fn set_line_width(&mut self, width: f32);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_composite(&mut self, op: CompositeOp);
    fn set_font_px(&mut self, px: f32);

    /// Discard the current path
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    /// Rounded corner at `(x1, y1)` heading towards `(x2, y2)`
    fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32);

    /// Outline every subpath of the current path
    fn stroke(&mut self);
    /// Fill the current path (nonzero winding)
    fn fill(&mut self);
    /// Fill a rectangle without touching the current path
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    /// Horizontally centred text with its baseline at `y`
    fn fill_text(&mut self, text: &str, x: f32, y: f32);
    fn stroke_text(&mut self, text: &str, x: f32, y: f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_unpacks_channels() {
        let c = Rgba::hex(0xff000080);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, 0.0);
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert!(Rgba::hex(0x00000000).is_transparent());
    }

    #[test]
    fn test_new_clamps_out_of_range() {
        let c = Rgba::new(510.0, -3.0, 127.5, 1.7);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 0.5).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }
}
