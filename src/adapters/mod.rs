pub mod config_store;
pub mod feedback_bridge;
pub mod http_connectivity;
pub mod settings_store;
pub mod simulated_recognizer;

pub use config_store::TomlConfigStore;
pub use feedback_bridge::{EventHapticDevice, EventSpeechSynthesizer};
pub use http_connectivity::HttpConnectivityMonitor;
pub use settings_store::{JsonFileSettingsStore, MemorySettingsStore};
pub use simulated_recognizer::SimulatedRecognizer;
