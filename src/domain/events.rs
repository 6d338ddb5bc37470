use serde::{Deserialize, Serialize};

use crate::domain::feedback::SpeechRequest;
use crate::domain::recognition::{CapturedImage, RecognitionResult};
use crate::domain::settings::Settings;
use crate::domain::status::AppStatus;

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// Speech cue forwarded to whatever plays audio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SpeechCue {
    Speak(SpeechRequest),
    Stop,
}

/// Events published by the controller to its subscribers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum AppEvent {
    /// The visible screen changed.
    StatusChanged { from: AppStatus, to: AppStatus },
    /// Transient notification to display.
    Notification {
        title: String,
        description: String,
        variant: NotificationVariant,
    },
    /// Something should be spoken, or speech should stop.
    Speech(SpeechCue),
    /// Vibrate with alternating on/off durations (empty = stop).
    Vibration { pattern_ms: Vec<u64> },
    /// Network reachability changed.
    ConnectivityChanged { online: bool },
    /// User settings changed and were persisted.
    SettingsChanged { settings: Settings },
    /// A recognition finished after it was superseded and was dropped.
    RecognitionDiscarded { request_id: u64 },
}

/// Serializable view of the application state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppSnapshot {
    pub status: AppStatus,
    pub result: Option<RecognitionResult>,
    pub error: Option<String>,
    pub image: Option<CapturedImage>,
    pub is_online: bool,
    pub is_supported_device: bool,
    pub settings: Settings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = AppEvent::StatusChanged {
            from: AppStatus::Camera,
            to: AppStatus::Processing,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("status_changed"));
        assert!(json.contains("\"from\":\"camera\""));
        assert!(json.contains("\"to\":\"processing\""));
    }

    #[test]
    fn test_speech_cue_serialization() {
        let event = AppEvent::Speech(SpeechCue::Stop);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"action\":\"stop\""));
    }
}
