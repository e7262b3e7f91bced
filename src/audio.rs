//! Sound effects for simulation events
//!
//! Procedurally generated tones - no external files needed! The tone table is
//! plain data so it can be checked natively; playback uses the Web Audio API
//! and only exists on wasm32.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Jump impulse
    Jump,
    /// Obstacle passed
    Score,
    /// Hit an obstacle, the ground or the ceiling
    Crash,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

/// A single oscillator sweep with an exponential gain decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    /// Peak gain before volume scaling
    pub gain: f32,
    /// Seconds
    pub duration: f64,
}

/// Gain the envelope decays to
pub const RELEASE_GAIN: f32 = 0.01;

impl SoundEffect {
    /// Which effect, if any, an event triggers
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jump => Some(SoundEffect::Jump),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::Collision { .. } => Some(SoundEffect::Crash),
            GameEvent::RunStarted { .. } | GameEvent::RunEnded { .. } => None,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            // Short rising chirp
            SoundEffect::Jump => Tone {
                waveform: Waveform::Square,
                start_hz: 150.0,
                end_hz: 300.0,
                gain: 0.05,
                duration: 0.1,
            },
            // Bright ping
            SoundEffect::Score => Tone {
                waveform: Waveform::Sine,
                start_hz: 800.0,
                end_hz: 1200.0,
                gain: 0.05,
                duration: 0.1,
            },
            // Falling buzz
            SoundEffect::Crash => Tone {
                waveform: Waveform::Sawtooth,
                start_hz: 100.0,
                end_hz: 20.0,
                gain: 0.1,
                duration: 0.3,
            },
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{RELEASE_GAIN, SoundEffect, Tone, Waveform};
    use crate::session::EventListener;
    use crate::settings::Settings;
    use crate::sim::GameEvent;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, volume: 1.0 }
        }

        /// Pick up volume and mute from settings
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            self.play_tone(ctx, &effect.tone());
        }

        /// Create an oscillator routed through a gain node
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

        fn play_tone(&self, ctx: &AudioContext, tone: &Tone) {
            let osc_type = match tone.waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
            };
            let Some((osc, gain)) = self.create_osc(ctx, tone.start_hz, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(tone.start_hz, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(tone.end_hz, t + tone.duration)
                .ok();
            gain.gain().set_value_at_time(tone.gain * self.volume, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(RELEASE_GAIN, t + tone.duration)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + tone.duration).ok();
        }
    }

    impl EventListener for AudioManager {
        fn on_event(&mut self, event: &GameEvent) {
            if let Some(effect) = SoundEffect::for_event(event) {
                self.play(effect);
            }
        }
    }
}
