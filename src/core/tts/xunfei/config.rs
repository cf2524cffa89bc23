//! Synthesis parameters for the Xunfei TTS session client.
//!
//! Callers supply an optional voice and optional speed/volume/pitch levels;
//! [`SynthesisParams::resolve`] fills in the upstream defaults and clamps
//! the levels into the accepted range before the request frame is built.

use super::{DEFAULT_LEVEL, DEFAULT_VOICE, MAX_LEVEL, MIN_LEVEL};

/// Caller-facing synthesis parameters.
///
/// Every field is optional; each one defaults independently when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesisParams {
    /// Voice identifier (e.g. `xiaoyan`, `catherine`).
    pub voice: Option<String>,
    /// Speaking speed, 0-100.
    pub speed: Option<i32>,
    /// Output volume, 0-100.
    pub volume: Option<i32>,
    /// Voice pitch, 0-100.
    pub pitch: Option<i32>,
}

impl SynthesisParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_volume(mut self, volume: i32) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn with_pitch(mut self, pitch: i32) -> Self {
        self.pitch = Some(pitch);
        self
    }

    /// Apply defaults and clamp levels into the accepted range.
    pub fn resolve(&self) -> ResolvedParams {
        fn level(value: Option<i32>) -> i32 {
            value.unwrap_or(DEFAULT_LEVEL).clamp(MIN_LEVEL, MAX_LEVEL)
        }

        ResolvedParams {
            voice: self
                .voice
                .clone()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_VOICE.to_string()),
            speed: level(self.speed),
            volume: level(self.volume),
            pitch: level(self.pitch),
        }
    }
}

/// Fully defaulted and clamped parameters, ready for the request frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedParams {
    pub voice: String,
    pub speed: i32,
    pub volume: i32,
    pub pitch: i32,
}
