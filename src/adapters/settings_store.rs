use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::domain::{DomainError, SettingKey};
use crate::ports::SettingsStore;

/// Settings persisted as one JSON object in a file.
///
/// The file is read once on open and rewritten on every change.
pub struct JsonFileSettingsStore {
    path: PathBuf,
    values: RwLock<Map<String, Value>>,
}

impl JsonFileSettingsStore {
    /// Open the store at `path`.
    ///
    /// A missing file starts empty. An unreadable or malformed file is
    /// logged and also starts empty; it is overwritten on the next change.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let values = match Self::read_file(&path) {
            Ok(values) => values,
            Err(e) => {
                warn!(path = ?path, error = %e, "Settings file unreadable, starting empty");
                Map::new()
            }
        };

        info!(path = ?path, keys = values.len(), "Settings store opened");

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(path: &Path) -> Result<Map<String, Value>, DomainError> {
        if !path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(path)?;
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            other => Err(DomainError::Storage(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    fn write_file(&self, values: &Map<String, Value>) -> Result<(), DomainError> {
        let content = serde_json::to_string_pretty(values)?;
        // Write to temp file first, then rename atomically
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl SettingsStore for JsonFileSettingsStore {
    fn get_value(&self, key: SettingKey) -> Result<Option<Value>, DomainError> {
        Ok(self.values.read().get(key.as_str()).cloned())
    }

    fn set_value(&self, key: SettingKey, value: Value) -> Result<(), DomainError> {
        // Held across the write so concurrent sets land in order
        let mut values = self.values.write();
        values.insert(key.as_str().to_string(), value);
        self.write_file(&values)?;
        debug!(key = %key, path = ?self.path, "Setting persisted");
        Ok(())
    }
}

/// Non-durable settings store.
#[derive(Default)]
pub struct MemorySettingsStore {
    values: RwLock<HashMap<SettingKey, Value>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get_value(&self, key: SettingKey) -> Result<Option<Value>, DomainError> {
        Ok(self.values.read().get(&key).cloned())
    }

    fn set_value(&self, key: SettingKey, value: Value) -> Result<(), DomainError> {
        self.values.write().insert(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Language, Settings, Theme, VoiceSpeed};
    use std::env;

    fn temp_path(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        dir.join("settings.json")
    }

    #[test]
    fn test_voice_speed_survives_reload() {
        let path = temp_path("currency_sense_settings_reload");

        let store: Box<dyn SettingsStore> = Box::new(JsonFileSettingsStore::open(&path).unwrap());
        store.set_setting(SettingKey::VoiceSpeed, &VoiceSpeed::Fast);
        drop(store);

        let reopened: Box<dyn SettingsStore> =
            Box::new(JsonFileSettingsStore::open(&path).unwrap());
        let speed = reopened.get_setting(SettingKey::VoiceSpeed, VoiceSpeed::Normal);
        assert_eq!(speed, VoiceSpeed::Fast);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_uses_original_key_names() {
        let path = temp_path("currency_sense_settings_keys");

        let store: Box<dyn SettingsStore> = Box::new(JsonFileSettingsStore::open(&path).unwrap());
        store.set_setting(SettingKey::DarkMode, &true);
        store.set_setting(SettingKey::Theme, &Theme::HighContrast);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"darkMode\": true"));
        assert!(content.contains("\"theme\": \"high-contrast\""));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let path = temp_path("currency_sense_settings_corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json {").unwrap();

        let store: Box<dyn SettingsStore> = Box::new(JsonFileSettingsStore::open(&path).unwrap());
        assert_eq!(store.load_settings(), Settings::default());

        // The next write replaces the corrupt file
        store.set_setting(SettingKey::Language, &Language::Tamil);
        let reopened: Box<dyn SettingsStore> =
            Box::new(JsonFileSettingsStore::open(&path).unwrap());
        assert_eq!(reopened.load_settings().language, Language::Tamil);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_mistyped_value_falls_back_per_key() {
        let store: Box<dyn SettingsStore> = Box::new(MemorySettingsStore::new());
        store.set_setting(SettingKey::VoiceEnabled, &"yes please");
        store.set_setting(SettingKey::HapticEnabled, &false);

        let settings = store.load_settings();
        assert!(settings.voice_enabled);
        assert!(!settings.haptic_enabled);
    }

    #[test]
    fn test_theme_defaults_from_dark_mode() {
        let store: Box<dyn SettingsStore> = Box::new(MemorySettingsStore::new());
        store.set_setting(SettingKey::DarkMode, &true);

        let settings = store.load_settings();
        assert_eq!(settings.theme, Theme::Dark);
        assert!(settings.is_theme_consistent());
    }

    #[test]
    fn test_inconsistent_stored_theme_follows_dark_mode() {
        let store: Box<dyn SettingsStore> = Box::new(MemorySettingsStore::new());
        store.set_setting(SettingKey::DarkMode, &true);
        store.set_setting(SettingKey::Theme, &Theme::Light);
        assert_eq!(store.load_settings().theme, Theme::Dark);

        store.set_setting(SettingKey::Theme, &Theme::HighContrast);
        let settings = store.load_settings();
        assert_eq!(settings.theme, Theme::HighContrast);
        assert!(settings.is_dark_mode);
    }

    #[test]
    fn test_save_settings_writes_only_listed_keys() {
        let store: Box<dyn SettingsStore> = Box::new(MemorySettingsStore::new());
        let settings = Settings {
            voice_speed: VoiceSpeed::Slow,
            language: Language::Hindi,
            ..Default::default()
        };
        store.save_settings(&settings, &[SettingKey::VoiceSpeed]);

        assert!(store.get_value(SettingKey::VoiceSpeed).unwrap().is_some());
        assert!(store.get_value(SettingKey::Language).unwrap().is_none());
    }
}
