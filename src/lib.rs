//! Noise Clock library - audio-reactive generative clock face

pub mod audio;
pub mod canvas;
pub mod clock;
pub mod params;
pub mod random;
pub mod rendering;

#[cfg(test)]
mod testing;
