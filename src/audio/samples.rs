//! Decoded tick samples.

use anyhow::{anyhow, bail, Result};
use kira::sound::static_sound::StaticSoundData;
use std::path::Path;

/// The full set of tick samples, indexed in load order
#[derive(Clone)]
pub struct SampleBank {
    sounds: Vec<StaticSoundData>,
}

impl SampleBank {
    /// Load every file in `files` from `dir`.
    ///
    /// Any missing or undecodable file fails the whole load.
    pub fn load(dir: impl AsRef<Path>, files: &[&str]) -> Result<Self> {
        let dir = dir.as_ref();
        let sounds = files
            .iter()
            .map(|name| {
                let path = dir.join(name);
                let sound = StaticSoundData::from_file(&path)
                    .map_err(|e| anyhow!("Failed to load sample {}: {:?}", path.display(), e))?;
                log::debug!(
                    "Loaded {} ({:.2}s @ {}Hz)",
                    name,
                    sound.duration().as_secs_f64(),
                    sound.sample_rate
                );
                Ok(sound)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_sounds(sounds)
    }

    pub fn from_sounds(sounds: Vec<StaticSoundData>) -> Result<Self> {
        if sounds.is_empty() {
            bail!("No tick samples to load");
        }
        if let Some(i) = sounds.iter().position(|s| s.duration().is_zero()) {
            bail!("Tick sample {} has no audio", i);
        }
        Ok(Self { sounds })
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StaticSoundData> {
        self.sounds.get(index)
    }

    /// Duration of a sample (seconds), 0 for an unknown index
    pub fn duration(&self, index: usize) -> f64 {
        self.get(index).map_or(0.0, |s| s.duration().as_secs_f64())
    }
}
