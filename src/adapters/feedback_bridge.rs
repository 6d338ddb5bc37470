use std::time::Duration;

use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::{AppEvent, DomainError, SpeechCue, SpeechRequest};
use crate::ports::{HapticDevice, SpeechSynthesizer};

/// Speech output delegated to the front-end.
///
/// The process has no audio device of its own; each utterance becomes an
/// `AppEvent::Speech` for whichever client owns the speech engine.
pub struct EventSpeechSynthesizer {
    events: broadcast::Sender<AppEvent>,
}

impl EventSpeechSynthesizer {
    pub fn new(events: broadcast::Sender<AppEvent>) -> Self {
        Self { events }
    }
}

impl SpeechSynthesizer for EventSpeechSynthesizer {
    fn speak(&self, request: &SpeechRequest) -> Result<(), DomainError> {
        debug!(chars = request.text.chars().count(), rate = request.rate, "Speech cue");
        self.events
            .send(AppEvent::Speech(SpeechCue::Speak(request.clone())))
            .map(|_| ())
            .map_err(|_| DomainError::Speech("no speech output attached".to_string()))
    }

    fn stop(&self) -> Result<(), DomainError> {
        self.events
            .send(AppEvent::Speech(SpeechCue::Stop))
            .map(|_| ())
            .map_err(|_| DomainError::Speech("no speech output attached".to_string()))
    }
}

/// Vibration delegated to the front-end.
pub struct EventHapticDevice {
    events: broadcast::Sender<AppEvent>,
}

impl EventHapticDevice {
    pub fn new(events: broadcast::Sender<AppEvent>) -> Self {
        Self { events }
    }

    fn send(&self, pattern_ms: Vec<u64>) -> Result<(), DomainError> {
        self.events
            .send(AppEvent::Vibration { pattern_ms })
            .map(|_| ())
            .map_err(|_| DomainError::Haptic("no vibration output attached".to_string()))
    }
}

impl HapticDevice for EventHapticDevice {
    fn vibrate(&self, pattern: &[Duration]) -> Result<(), DomainError> {
        if pattern.is_empty() {
            return Err(DomainError::Haptic("empty vibration pattern".to_string()));
        }
        let pattern_ms = pattern.iter().map(|d| d.as_millis() as u64).collect();
        self.send(pattern_ms)
    }

    fn stop(&self) -> Result<(), DomainError> {
        self.send(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HapticPattern, Language};

    #[test]
    fn test_speech_forwarded_as_event() {
        let (tx, mut rx) = broadcast::channel(8);
        let speech = EventSpeechSynthesizer::new(tx);

        let request = SpeechRequest::new("100 Indian Rupee", Language::English).with_rate(1.2);
        speech.speak(&request).unwrap();

        match rx.try_recv().unwrap() {
            AppEvent::Speech(SpeechCue::Speak(sent)) => assert_eq!(sent, request),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_vibration_forwarded_in_millis() {
        let (tx, mut rx) = broadcast::channel(8);
        let haptics = EventHapticDevice::new(tx);

        haptics.vibrate(&HapticPattern::Error.durations()).unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            AppEvent::Vibration {
                pattern_ms: vec![100, 30, 100, 30, 100]
            }
        );

        haptics.stop().unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            AppEvent::Vibration { pattern_ms: vec![] }
        );
    }

    #[test]
    fn test_no_subscriber_is_an_error() {
        let (tx, rx) = broadcast::channel(8);
        drop(rx);
        let speech = EventSpeechSynthesizer::new(tx);
        assert!(speech.stop().is_err());
    }
}
