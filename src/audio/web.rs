//! Web Audio synthesis
//!
//! Procedurally generated cues - no external files needed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::{SoundCue, SoundSink};
use crate::error::AudioError;

/// Oscillator-based cue player
pub struct WebAudio {
    ctx: Option<AudioContext>,
}

impl Default for WebAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudio {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx }
    }

    /// Resume the context (browsers require a user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Result<(OscillatorNode, GainNode), AudioError> {
        let fail = |err: wasm_bindgen::JsValue| AudioError::Playback(format!("{err:?}"));
        let osc = ctx.create_oscillator().map_err(fail)?;
        let gain = ctx.create_gain().map_err(fail)?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).map_err(fail)?;
        gain.connect_with_audio_node(&ctx.destination())
            .map_err(fail)?;
        Ok((osc, gain))
    }

    /// One enveloped note starting `delay` seconds from now
    fn note(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
        delay: f64,
        length: f64,
        level: f32,
    ) -> Result<(OscillatorNode, f64), AudioError> {
        let (osc, gain) = Self::create_osc(ctx, freq, osc_type)?;
        let t = ctx.current_time() + delay;
        gain.gain().set_value_at_time(level, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + length)
            .ok();
        osc.start_with_when(t).ok();
        osc.stop_with_when(t + length + 0.05).ok();
        Ok((osc, t))
    }

    /// Slice - quick downward swish
    fn play_slice(ctx: &AudioContext, vol: f32) -> Result<(), AudioError> {
        let (osc, t) = Self::note(ctx, 900.0, OscillatorType::Triangle, 0.0, 0.12, vol * 0.4)?;
        osc.frequency().set_value_at_time(900.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(300.0, t + 0.12)
            .ok();
        Ok(())
    }

    /// Combo - rising arpeggio
    fn play_combo(ctx: &AudioContext, vol: f32) -> Result<(), AudioError> {
        for (i, freq) in [660.0, 880.0, 1320.0].iter().enumerate() {
            Self::note(ctx, *freq, OscillatorType::Square, i as f64 * 0.06, 0.12, vol * 0.2)?;
        }
        Ok(())
    }

    /// Miss - dull low thud
    fn play_miss(ctx: &AudioContext, vol: f32) -> Result<(), AudioError> {
        let (osc, t) = Self::note(ctx, 180.0, OscillatorType::Sine, 0.0, 0.15, vol * 0.5)?;
        osc.frequency()
            .exponential_ramp_to_value_at_time(90.0, t + 0.15)
            .ok();
        Ok(())
    }

    /// Game over - sad descending
    fn play_game_over(ctx: &AudioContext, vol: f32) -> Result<(), AudioError> {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            Self::note(ctx, *freq, OscillatorType::Sine, i as f64 * 0.2, 0.3, vol * 0.3)?;
        }
        Ok(())
    }

    /// Button - short click
    fn play_button(ctx: &AudioContext, vol: f32) -> Result<(), AudioError> {
        Self::note(ctx, 700.0, OscillatorType::Sine, 0.0, 0.05, vol * 0.3)?;
        Ok(())
    }

    /// Correct - bright two-note chime
    fn play_correct(ctx: &AudioContext, vol: f32) -> Result<(), AudioError> {
        Self::note(ctx, 1000.0, OscillatorType::Sine, 0.0, 0.12, vol * 0.3)?;
        Self::note(ctx, 1500.0, OscillatorType::Sine, 0.08, 0.2, vol * 0.3)?;
        Ok(())
    }

    /// Wrong - buzzer
    fn play_wrong(ctx: &AudioContext, vol: f32) -> Result<(), AudioError> {
        Self::note(ctx, 120.0, OscillatorType::Sawtooth, 0.0, 0.25, vol * 0.3)?;
        Ok(())
    }

    /// BGM - one two-second phrase
    fn play_bgm(ctx: &AudioContext, vol: f32) -> Result<(), AudioError> {
        let melody = [523.0, 659.0, 784.0, 659.0, 587.0, 698.0, 880.0, 698.0];
        for (i, freq) in melody.iter().enumerate() {
            Self::note(ctx, *freq, OscillatorType::Triangle, i as f64 * 0.25, 0.2, vol * 0.5)?;
        }
        Ok(())
    }
}

impl SoundSink for WebAudio {
    fn play(&mut self, cue: SoundCue, volume: f32) -> Result<(), AudioError> {
        let Some(ctx) = &self.ctx else {
            return Err(AudioError::Unavailable);
        };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            SoundCue::Slice => Self::play_slice(ctx, volume),
            SoundCue::Combo => Self::play_combo(ctx, volume),
            SoundCue::Miss => Self::play_miss(ctx, volume),
            SoundCue::GameOver => Self::play_game_over(ctx, volume),
            SoundCue::Button => Self::play_button(ctx, volume),
            SoundCue::Correct => Self::play_correct(ctx, volume),
            SoundCue::Wrong => Self::play_wrong(ctx, volume),
            SoundCue::Bgm => Self::play_bgm(ctx, volume),
        }
    }
}
