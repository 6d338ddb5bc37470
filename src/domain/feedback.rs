use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::settings::Language;

/// Named vibration patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HapticPattern {
    Short,
    Success,
    Error,
}

impl HapticPattern {
    /// Alternating vibrate/pause durations in milliseconds.
    pub fn millis(&self) -> &'static [u64] {
        match self {
            HapticPattern::Short => &[50],
            HapticPattern::Success => &[50, 50, 150],
            HapticPattern::Error => &[100, 30, 100, 30, 100],
        }
    }

    pub fn durations(&self) -> Vec<Duration> {
        self.millis().iter().copied().map(Duration::from_millis).collect()
    }
}

/// Vibration used when previewing haptic intensity (0-100).
pub fn preview_vibration(intensity: u8) -> Vec<Duration> {
    let pulse = Duration::from_millis(100 + 3 * u64::from(intensity.min(100)));
    vec![pulse, Duration::from_millis(50), pulse]
}

/// A single utterance for the speech synthesizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    /// Rate multiplier, clamped to [0.5, 2.0].
    pub rate: f32,
    /// Pitch multiplier; utterances here always use the voice's natural pitch.
    pub pitch: f32,
    /// Volume, clamped to [0.0, 1.0].
    pub volume: f32,
    /// Preferred voice locale (BCP-47).
    pub locale: String,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
            locale: language.speech_locale().to_string(),
        }
    }

    #[must_use]
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = clamp_or(rate, 0.5, 2.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = clamp_or(volume, 0.0, 1.0, 1.0);
        self
    }
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_durations() {
        assert_eq!(HapticPattern::Short.millis(), &[50]);
        assert_eq!(HapticPattern::Success.millis(), &[50, 50, 150]);
        assert_eq!(HapticPattern::Error.durations().len(), 5);
    }

    #[test]
    fn test_preview_vibration() {
        let pattern = preview_vibration(50);
        assert_eq!(
            pattern,
            vec![
                Duration::from_millis(250),
                Duration::from_millis(50),
                Duration::from_millis(250)
            ]
        );
        // Intensity saturates at 100
        assert_eq!(preview_vibration(255)[0], Duration::from_millis(400));
    }

    #[test]
    fn test_speech_request_clamping() {
        let request = SpeechRequest::new("hello", Language::English)
            .with_rate(3.0)
            .with_volume(f32::NAN);
        assert_eq!(request.rate, 2.0);
        assert_eq!(request.pitch, 1.0);
        assert_eq!(request.volume, 1.0);
        assert_eq!(request.locale, "en-IN");
    }
}
