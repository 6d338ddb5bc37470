pub mod config;
pub mod connectivity;
pub mod haptics;
pub mod recognizer;
pub mod settings;
pub mod speech;

pub use config::ConfigStore;
pub use connectivity::ConnectivityMonitor;
pub use haptics::HapticDevice;
pub use recognizer::{Recognizer, RecognizerCapabilities};
pub use settings::SettingsStore;
pub use speech::SpeechSynthesizer;
