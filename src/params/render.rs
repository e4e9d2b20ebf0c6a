//! Window and surface configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Initial window width (pixels)
    pub window_width: u32,

    /// Initial window height (pixels)
    pub window_height: u32,

    /// Window title
    pub title: &'static str,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 900,
            window_height: 900,
            title: "Noise Clock",
        }
    }
}

impl RenderConfig {
    /// Side of the square drawing area fitted into a window of the given size
    pub fn canvas_side(width: u32, height: u32) -> u32 {
        width.min(height).max(1)
    }
}
