pub mod config;
pub mod error;
pub mod events;
pub mod feedback;
pub mod messages;
pub mod recognition;
pub mod settings;
pub mod status;

pub use config::AppConfig;
pub use error::DomainError;
pub use events::{AppEvent, AppSnapshot, NotificationVariant, SpeechCue};
pub use feedback::{HapticPattern, SpeechRequest};
pub use messages::{message, MessageKey};
pub use recognition::{CapturedImage, RecognitionResult};
pub use settings::{AppMode, Language, SettingKey, Settings, Theme, VoiceSpeed};
pub use status::AppStatus;
