//! Audio output: tick samples played through a kira `AudioManager`.

use anyhow::{anyhow, Result};
use glam::Vec3;
use kira::{
    manager::{backend::DefaultBackend, AudioManager, AudioManagerSettings},
    sound::{
        static_sound::{StaticSoundHandle, StaticSoundSettings},
        PlaybackState,
    },
    spatial::{
        emitter::{EmitterDistances, EmitterHandle, EmitterSettings},
        listener::{ListenerHandle, ListenerSettings},
        scene::{SpatialSceneHandle, SpatialSceneSettings},
    },
    tween::{Easing, Tween},
    Volume,
};
use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::samples::SampleBank;
use super::{AudioEngine, GainRamp, VoiceId, VoiceRequest};

/// Sources closer than this play at full volume (meters)
const MIN_DISTANCE: f32 = 1.0;

/// Sources at or beyond this are silent (meters)
const MAX_DISTANCE: f32 = 8.0;

/// Returned when a voice could not be started; ramps on it are ignored
const NO_VOICE: VoiceId = VoiceId(u64::MAX);

/// Playback speed for a detune, as an `AudioBufferSourceNode` applies it
pub fn detune_rate(cents: f32) -> f64 {
    2f64.powf(f64::from(cents) / 1200.0)
}

/// Target volume and tween for a ramp scheduled at audio time `now`
pub fn ramp_tween(now: f64, ramp: GainRamp) -> (Volume, Tween) {
    let (value, end_time, easing) = match ramp {
        GainRamp::Linear { value, end_time } => (value, end_time, Easing::Linear),
        // Fast initial drop, slow tail
        GainRamp::Exponential { value, end_time } => (value, end_time, Easing::OutPowi(3)),
    };
    let tween = Tween {
        duration: Duration::from_secs_f64((end_time - now).max(0.0)),
        easing,
        ..Default::default()
    };
    (Volume::Amplitude(f64::from(value)), tween)
}

fn mint_vec(v: Vec3) -> mint::Vector3<f32> {
    mint::Vector3::from(v.to_array())
}

/// A playing tick and the emitter placing it
struct Voice {
    sound: StaticSoundHandle,
    _emitter: EmitterHandle,
}

/// Live audio graph: preloaded samples played through the default output
pub struct AudioSystem {
    manager: AudioManager,
    bank: SampleBank,
    scene: SpatialSceneHandle,

    /// Listener at the origin facing -Z (kept alive)
    _listener: ListenerHandle,

    voices: HashMap<VoiceId, Voice>,
    next_id: u64,

    /// Audio clock origin
    started: Instant,
}

impl AudioSystem {
    /// Open the default output device.
    ///
    /// Takes a loaded [`SampleBank`], so no tick can be evaluated before
    /// every sample is decoded.
    pub fn new(bank: SampleBank) -> Result<Self> {
        let mut manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| anyhow!("Failed to create audio manager: {:?}", e))?;

        let mut scene = manager
            .add_spatial_scene(SpatialSceneSettings::default())
            .map_err(|e| anyhow!("Failed to create spatial scene: {:?}", e))?;

        let facing_forward = mint::Quaternion {
            v: mint_vec(Vec3::ZERO),
            s: 1.0,
        };
        let listener = scene
            .add_listener(mint_vec(Vec3::ZERO), facing_forward, ListenerSettings::default())
            .map_err(|e| anyhow!("Failed to create listener: {:?}", e))?;

        log::info!("Audio: output started with {} tick samples", bank.len());

        Ok(Self {
            manager,
            bank,
            scene,
            _listener: listener,
            voices: HashMap::new(),
            next_id: 0,
            started: Instant::now(),
        })
    }

    /// Forget voices that have played to the end, releasing their emitters
    fn prune(&mut self) {
        self.voices
            .retain(|_, voice| voice.sound.state() != PlaybackState::Stopped);
    }
}

impl AudioEngine for AudioSystem {
    fn current_time(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    fn sample_count(&self) -> usize {
        self.bank.len()
    }

    fn sample_duration(&self, index: usize) -> f64 {
        self.bank.duration(index)
    }

    fn start_voice(&mut self, request: VoiceRequest) -> VoiceId {
        self.prune();

        let Some(data) = self.bank.get(request.sample_index) else {
            log::warn!("No tick sample at index {}", request.sample_index);
            return NO_VOICE;
        };

        let emitter_settings = EmitterSettings::new().distances(EmitterDistances {
            min_distance: MIN_DISTANCE,
            max_distance: MAX_DISTANCE,
        });
        let emitter = match self
            .scene
            .add_emitter(mint_vec(request.position), emitter_settings)
        {
            Ok(emitter) => emitter,
            Err(e) => {
                log::warn!("Failed to place tick: {:?}", e);
                return NO_VOICE;
            }
        };

        let settings = StaticSoundSettings::new()
            .start_position(request.start_offset)
            .playback_rate(detune_rate(request.detune_cents))
            .volume(Volume::Amplitude(f64::from(request.initial_gain)))
            .output_destination(&emitter);

        match self.manager.play(data.clone().with_settings(settings)) {
            Ok(sound) => {
                let id = VoiceId(self.next_id);
                self.next_id += 1;
                self.voices.insert(
                    id,
                    Voice {
                        sound,
                        _emitter: emitter,
                    },
                );
                id
            }
            Err(e) => {
                log::warn!("Failed to play tick: {:?}", e);
                NO_VOICE
            }
        }
    }

    fn ramp_gain(&mut self, voice: VoiceId, ramp: GainRamp) {
        let now = self.current_time();
        if let Some(playing) = self.voices.get_mut(&voice) {
            let (volume, tween) = ramp_tween(now, ramp);
            playing.sound.set_volume(volume, tween);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detune_rate_doubles_per_octave() {
        assert_eq!(detune_rate(0.0), 1.0);
        assert!((detune_rate(1200.0) - 2.0).abs() < 1e-12);
        assert!((detune_rate(-2400.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_ramp_runs_until_end_time() {
        let (volume, tween) = ramp_tween(
            1.5,
            GainRamp::Exponential {
                value: 0.03,
                end_time: 2.0,
            },
        );
        assert!(matches!(volume, Volume::Amplitude(v) if (v - 0.03).abs() < 1e-6));
        assert_eq!(tween.duration, Duration::from_millis(500));
        assert!(matches!(tween.easing, Easing::OutPowi(3)));

        let (_, tween) = ramp_tween(
            0.0,
            GainRamp::Linear {
                value: 0.5,
                end_time: 0.25,
            },
        );
        assert_eq!(tween.duration, Duration::from_millis(250));
        assert!(matches!(tween.easing, Easing::Linear));
    }

    #[test]
    fn test_ramp_already_past_end_is_immediate() {
        let (_, tween) = ramp_tween(
            3.0,
            GainRamp::Linear {
                value: 0.5,
                end_time: 2.0,
            },
        );
        assert_eq!(tween.duration, Duration::ZERO);
    }
}
