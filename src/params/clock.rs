//! Clock face parameters: noise field, rings, hour glyphs and hands.

use crate::canvas::Rgba;

/// Damped random walk driving ring radii and glyph jitter
#[derive(Debug, Clone)]
pub struct FieldParams {
    /// Number of samples around the circle (one per ring vertex)
    pub resolution: usize,

    /// Retained fraction of the previous value per step (0..1)
    pub damping: f32,

    /// Scale of the new random contribution, multiplied by the amplitude
    pub step_scale: f32,

    /// Amplitude floor (pixels); amplitude = base * (1 + sin²(...))
    pub amplitude_base: f32,

    /// Angular rate of the amplitude sinusoid (cycles per elapsed millisecond)
    pub amplitude_rate_per_ms: f64,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            resolution: 50,
            damping: 0.9,
            step_scale: 0.2,
            amplitude_base: 20.0,
            amplitude_rate_per_ms: 1e-6, // ~16 minutes per swell
        }
    }
}

/// Concentric contour rings
#[derive(Debug, Clone)]
pub struct RingParams {
    /// Number of rings drawn per frame
    pub num_circles: usize,

    /// Maximum random addition to each ring's radius scale (dimensionless)
    pub radius_jitter: f32,

    /// Fill for even-numbered rings
    pub fill_even: Rgba,

    /// Fill for odd-numbered rings
    pub fill_odd: Rgba,

    /// Outline color
    pub stroke: Rgba,

    /// Outline width (pixels)
    pub line_width: f32,
}

impl Default for RingParams {
    fn default() -> Self {
        Self {
            num_circles: 7,
            radius_jitter: 0.1,
            fill_even: Rgba::hex(0x4557af63),
            fill_odd: Rgba::hex(0xaf4d2573),
            stroke: Rgba::hex(0x33003371),
            line_width: 1.0,
        }
    }
}

/// Per-slot glitch ("blink") behavior of the hour labels
#[derive(Debug, Clone)]
pub struct BlinkParams {
    /// A slot starts glitching when its per-frame draw exceeds this (0..1)
    pub threshold: f64,

    /// Length of a glitch window (frames); the counter wraps at this value
    pub num_frames: u32,
}

impl Default for BlinkParams {
    fn default() -> Self {
        Self {
            threshold: 0.995,
            num_frames: 15,
        }
    }
}

/// Hour labels
#[derive(Debug, Clone)]
pub struct GlyphParams {
    /// Label font size (pixels)
    pub font_px: f32,

    /// Font size multiplier while glitching
    pub glitch_font_scale: f32,

    /// Jitter multiplier while glitching
    pub glitch_jitter_scale: f32,

    /// Radial gap between ring radius and filled label (pixels)
    pub fill_offset: f32,

    /// Radial gap between ring radius and label outline (pixels)
    pub stroke_offset: f32,

    /// Normal label fill
    pub fill: Rgba,

    /// Normal label outline
    pub stroke: Rgba,

    /// Glitched label fill
    pub glitch_fill: Rgba,

    /// Glitched label outline
    pub glitch_stroke: Rgba,

    /// Glitched outline width (pixels)
    pub glitch_line_width: f32,

    /// Halo width oscillation rate (radians per elapsed millisecond)
    pub halo_rate_per_ms: f32,

    pub blink: BlinkParams,
}

impl Default for GlyphParams {
    fn default() -> Self {
        Self {
            font_px: 48.0,
            glitch_font_scale: 1.125,
            glitch_jitter_scale: 1.74,
            fill_offset: 15.0,
            stroke_offset: 10.0,
            fill: Rgba::hex(0xAAEE2271),
            stroke: Rgba::hex(0xf4ce2533),
            glitch_fill: Rgba::hex(0x00000000),
            glitch_stroke: Rgba::hex(0xFF3F3FFF),
            glitch_line_width: 0.75,
            halo_rate_per_ms: 1e-4,
            blink: BlinkParams::default(),
        }
    }
}

/// One clock hand
#[derive(Debug, Clone, Copy)]
pub struct HandSpec {
    /// Length as a fraction of the clock radius
    pub radius_fraction: f32,

    /// Length jitter (pixels) multiplied by the shared per-frame hand noise
    pub radius_noise: f32,

    /// Rotation rate; angle = π * elapsed_ms * frequency
    pub frequency: f64,
}

/// Both hands and their shared stroke style
#[derive(Debug, Clone)]
pub struct HandParams {
    pub slow: HandSpec,
    pub fast: HandSpec,

    /// Number of polyline segments per hand
    pub segments: usize,

    /// Maximum lateral jitter per vertex (pixels)
    pub lateral_jitter: f32,

    pub color: Rgba,

    /// Stroke width (pixels)
    pub line_width: f32,
}

impl Default for HandParams {
    fn default() -> Self {
        Self {
            slow: HandSpec {
                radius_fraction: 1.5,
                radius_noise: 5.0,
                frequency: 1e-4,
            },
            fast: HandSpec {
                radius_fraction: 0.6,
                radius_noise: 1.0,
                frequency: 1e-3, // 10x the slow hand
            },
            segments: 10,
            lateral_jitter: 10.0,
            color: Rgba::hex(0xdba13daa),
            line_width: 9.0,
        }
    }
}

/// Full clock face configuration
#[derive(Debug, Clone)]
pub struct ClockParams {
    /// Clock radius = min(canvas width, height) / this
    pub radius_divisor: f32,

    pub field: FieldParams,
    pub rings: RingParams,
    pub glyphs: GlyphParams,
    pub hands: HandParams,
}

impl Default for ClockParams {
    fn default() -> Self {
        Self {
            radius_divisor: 2.5,
            field: FieldParams::default(),
            rings: RingParams::default(),
            glyphs: GlyphParams::default(),
            hands: HandParams::default(),
        }
    }
}

impl ClockParams {
    /// Base clock radius (pixels) for a canvas of the given size
    pub fn radius(&self, width: f32, height: f32) -> f32 {
        width.min(height) / self.radius_divisor
    }
}
