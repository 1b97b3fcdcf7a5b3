//! Audio system using Web Audio API
//!
//! Cues and music are synthesised with oscillators, so no audio files are
//! needed. The simulation only emits `Cue`/`Music` events; this module is
//! the host side that plays them.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::{Cue, Music};

/// A playing music layer
struct Voice {
    osc: OscillatorNode,
    gain: GainNode,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music: Option<Music>,
    voices: Vec<Voice>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,
            music: None,
            voices: Vec::new(),
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = settings.music_volume.clamp(0.0, 1.0);
        self.set_muted(settings.muted);
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        let level = self.music_level();
        for voice in &self.voices {
            voice.gain.gain().set_value(level);
        }
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn music_level(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume * 0.08
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Short enveloped tone, optionally sliding to `end_freq`
    #[allow(clippy::too_many_arguments)]
    fn tone(
        &self,
        ctx: &AudioContext,
        freq: f32,
        end_freq: Option<f32>,
        osc_type: OscillatorType,
        delay: f64,
        duration: f64,
        level: f32,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
            return;
        };
        let t = ctx.current_time() + delay;
        gain.gain().set_value_at_time(0.0, ctx.current_time()).ok();
        gain.gain().set_value_at_time(level, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + duration)
            .ok();
        if let Some(end) = end_freq {
            osc.frequency().set_value_at_time(freq, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(end, t + duration)
                .ok();
        }
        osc.start_with_when(t).ok();
        osc.stop_with_when(t + duration + 0.05).ok();
    }

    /// Play a one-shot cue
    pub fn play(&self, cue: Cue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        use OscillatorType::{Sawtooth, Sine, Square, Triangle};
        match cue {
            Cue::Beam => self.tone(ctx, 300.0, Some(900.0), Sine, 0.0, 0.6, vol * 0.3),
            Cue::ShipEngine => self.tone(ctx, 80.0, Some(40.0), Sawtooth, 0.0, 1.2, vol * 0.25),
            Cue::ShipFlying => self.tone(ctx, 120.0, Some(240.0), Triangle, 0.0, 0.5, vol * 0.3),
            Cue::QuizCorrect => {
                self.tone(ctx, 523.0, None, Sine, 0.0, 0.15, vol * 0.4);
                self.tone(ctx, 784.0, None, Sine, 0.12, 0.25, vol * 0.4);
            }
            Cue::QuizWrong => self.tone(ctx, 220.0, Some(110.0), Square, 0.0, 0.35, vol * 0.2),
            Cue::Confetti => {
                for (i, freq) in [523.0, 659.0, 784.0, 1047.0].into_iter().enumerate() {
                    self.tone(ctx, freq, None, Triangle, i as f64 * 0.08, 0.2, vol * 0.3);
                }
            }
            Cue::Fireworks => {
                for i in 0..3 {
                    let delay = i as f64 * 0.25;
                    self.tone(ctx, 1200.0, Some(200.0), Sine, delay, 0.4, vol * 0.25);
                }
            }
            Cue::Victory => {
                for (i, freq) in [392.0, 523.0, 659.0, 784.0, 1047.0].into_iter().enumerate() {
                    self.tone(ctx, freq, None, Square, i as f64 * 0.12, 0.3, vol * 0.15);
                }
            }
            Cue::Alarm => {
                for i in 0..4 {
                    self.tone(ctx, 880.0, Some(660.0), Square, i as f64 * 0.3, 0.25, vol * 0.15);
                }
            }
            Cue::Crash => self.tone(ctx, 200.0, Some(30.0), Sawtooth, 0.0, 0.8, vol * 0.5),
        }
    }

    /// Switch the background track; replaying the current one is a no-op
    pub fn set_music(&mut self, music: Music) {
        if self.music == Some(music) {
            return;
        }
        self.music = Some(music);
        for voice in self.voices.drain(..) {
            voice.osc.stop().ok();
            voice.osc.disconnect().ok();
            voice.gain.disconnect().ok();
        }
        let Some(ctx) = self.ctx.as_ref() else { return };

        let chord: &[f32] = match music {
            Music::Ambient => &[110.0, 164.8],
            Music::Survival => &[98.0, 116.5, 146.8],
            Music::Celebration => &[130.8, 164.8, 196.0],
        };
        let level = self.music_level();
        let mut voices = Vec::with_capacity(chord.len());
        for &freq in chord {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
                continue;
            };
            gain.gain().set_value(level);
            osc.start().ok();
            voices.push(Voice { osc, gain });
        }
        self.voices = voices;
        log::debug!("Music: {:?}", music);
    }
}
