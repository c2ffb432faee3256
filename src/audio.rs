//! Audio system using Web Audio API
//!
//! Brick hits are synthesised on the fly. Background music streams from the
//! page's `<audio id="bgMusic">` element when there is one, otherwise a soft
//! oscillator pad loops in its place.

use wasm_bindgen::JsCast;
use web_sys::{AudioContext, GainNode, HtmlMediaElement, OscillatorNode, OscillatorType};

use crate::platform::Audio;
use crate::settings::Settings;

/// Element id of the optional background track
pub const MUSIC_ELEMENT_ID: &str = "bgMusic";

/// Pad chord used when the page ships no music track (Hz)
const PAD_CHORD: [f32; 3] = [110.0, 164.81, 220.0];

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    track: Option<HtmlMediaElement>,
    pad: Vec<(OscillatorNode, GainNode)>,
    sfx_volume: f32,
    music_volume: f32,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - hit sounds disabled");
        }

        let track = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(MUSIC_ELEMENT_ID))
            .and_then(|el| el.dyn_into::<HtmlMediaElement>().ok());
        if let Some(track) = &track {
            track.set_loop(true);
            track.set_volume(f64::from(settings.effective_music_volume()));
        } else {
            log::info!("No #{MUSIC_ELEMENT_ID} element, using synthesised pad");
        }

        Self {
            ctx,
            track,
            pad: Vec::new(),
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
        }
    }

    /// Resume audio context (browsers require a user gesture first)
    fn resume(&self) -> Option<&AudioContext> {
        let ctx = self.ctx.as_ref()?;
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some(ctx)
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

    fn start_pad(&mut self) {
        if !self.pad.is_empty() || self.music_volume <= 0.0 {
            return;
        }
        let Some(ctx) = self.resume() else { return };
        let t = ctx.current_time();
        let vol = self.music_volume * 0.05;

        let mut voices = Vec::with_capacity(PAD_CHORD.len());
        for freq in PAD_CHORD {
            if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) {
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().linear_ramp_to_value_at_time(vol, t + 1.0).ok();
                osc.start().ok();
                voices.push((osc, gain));
            }
        }
        self.pad = voices;
    }

    fn stop_pad(&mut self) {
        let Some(ctx) = &self.ctx else {
            self.pad.clear();
            return;
        };
        let t = ctx.current_time();
        for (osc, gain) in self.pad.drain(..) {
            gain.gain().set_value_at_time(gain.gain().value(), t).ok();
            gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.3).ok();
            osc.stop_with_when(t + 0.35).ok();
        }
    }
}

impl Audio for AudioManager {
    /// Brick hit - short bright tap
    fn play_hit_sound(&mut self) {
        let vol = self.sfx_volume;
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = self.resume() else { return };
        let Some((osc, gain)) = self.create_osc(ctx, 600.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(600.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(900.0, t + 0.05)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    fn play_background_music(&mut self) {
        match &self.track {
            Some(track) => {
                // Autoplay may be refused until the first user gesture
                if let Err(err) = track.play() {
                    log::warn!("Background music refused: {err:?}");
                }
            }
            None => self.start_pad(),
        }
    }

    fn pause_background_music(&mut self) {
        match &self.track {
            Some(track) => {
                let _ = track.pause();
            }
            None => self.stop_pad(),
        }
    }
}
