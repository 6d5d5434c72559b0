//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::frontend::{FrontendError, Sound};

/// Master gain for every effect
const VOLUME: f32 = 0.8;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
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
        Self { ctx }
    }

    /// Play a sound effect
    pub fn play(&self, sound: Sound) -> Result<(), FrontendError> {
        let Some(ctx) = &self.ctx else {
            return Err(FrontendError::AudioUnavailable);
        };
        // Browsers suspend the context until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match sound {
            Sound::CoinCollect => self.play_coin(ctx, VOLUME),
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Result<(OscillatorNode, GainNode), FrontendError> {
        let osc = ctx.create_oscillator().map_err(js_err)?;
        let gain = ctx.create_gain().map_err(js_err)?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).map_err(js_err)?;
        gain.connect_with_audio_node(&ctx.destination())
            .map_err(js_err)?;

        Ok((osc, gain))
    }

    /// Coin - rising three-note chime
    fn play_coin(&self, ctx: &AudioContext, vol: f32) -> Result<(), FrontendError> {
        for (i, freq) in [880.0, 1175.0, 1568.0].iter().enumerate() {
            let delay = i as f64 * 0.06;
            let (osc, gain) = self.create_osc(ctx, *freq, OscillatorType::Square)?;
            let t = ctx.current_time() + delay;
            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.start_with_when(t).map_err(js_err)?;
            osc.stop_with_when(t + 0.15).map_err(js_err)?;
        }
        Ok(())
    }
}

fn js_err(e: wasm_bindgen::JsValue) -> FrontendError {
    FrontendError::Dom(format!("{:?}", e))
}
