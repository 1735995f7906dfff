//! Sound cue routing
//!
//! The simulation only emits `SoundCue`s. `dispatch` applies the player's
//! mixer settings and hands the cue to a `SoundSink`; playback failures are
//! logged and otherwise ignored.

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

pub use crate::sim::SoundCue;

use crate::error::AudioError;
use crate::settings::SoundSettings;

/// Anything that can play a cue at a given volume (0.0 - 1.0)
pub trait SoundSink {
    fn play(&mut self, cue: SoundCue, volume: f32) -> Result<(), AudioError>;
}

/// Silent sink that remembers what it was asked to play
#[derive(Debug, Default, Clone)]
pub struct LogSink {
    played: Vec<(SoundCue, f32)>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> &[(SoundCue, f32)] {
        &self.played
    }

    pub fn count(&self, cue: SoundCue) -> usize {
        self.played.iter().filter(|(c, _)| *c == cue).count()
    }

    pub fn clear(&mut self) {
        self.played.clear();
    }
}

impl SoundSink for LogSink {
    fn play(&mut self, cue: SoundCue, volume: f32) -> Result<(), AudioError> {
        log::debug!("sound {cue:?} at {volume:.2}");
        self.played.push((cue, volume));
        Ok(())
    }
}

/// Effective volume for a cue, `None` when it should stay silent
pub fn cue_volume(settings: &SoundSettings, cue: SoundCue, gain: f32) -> Option<f32> {
    if settings.muted {
        return None;
    }
    let volume = match cue {
        SoundCue::Bgm => settings.bgm_volume,
        _ => settings.sfx_volume * gain,
    };
    (volume > 0.0).then_some(volume.clamp(0.0, 1.0))
}

/// Play a cue through `sink` honoring the mixer; never fails
pub fn dispatch(sink: &mut impl SoundSink, settings: &SoundSettings, cue: SoundCue, gain: f32) {
    let Some(volume) = cue_volume(settings, cue, gain) else {
        return;
    };
    if let Err(err) = sink.play(cue, volume) {
        log::warn!("Sound {cue:?} failed: {err}");
    }
}
