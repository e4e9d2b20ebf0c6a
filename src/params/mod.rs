//! Parameter definitions with units and documented semantics.
//!
//! Every tunable of the clock lives here as a `Default` implementation:
//! - Units (pixels, milliseconds, seconds, cents)
//! - Documented ranges and meanings
//! - No runtime configuration; change the defaults to retune

mod audio;
mod clock;
mod render;

// Re-export all types
pub use audio::{TickParams, SAMPLE_DIR, TICK_SAMPLE_FILES};
pub use clock::{BlinkParams, ClockParams, FieldParams, GlyphParams, HandParams, HandSpec, RingParams};
pub use render::RenderConfig;
