use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{DomainError, SettingKey, Settings, Theme};

/// Port for key-value persistence of user settings.
///
/// Values are stored JSON-encoded. No atomicity is promised across keys.
pub trait SettingsStore: Send + Sync {
    /// Raw value stored under `key`, if any.
    fn get_value(&self, key: SettingKey) -> Result<Option<Value>, DomainError>;

    /// Store `value` under `key`.
    fn set_value(&self, key: SettingKey, value: Value) -> Result<(), DomainError>;
}

impl dyn SettingsStore {
    /// Typed read with best-effort semantics: missing, unreadable or
    /// mistyped values yield `default`.
    pub fn get_setting<T: DeserializeOwned>(&self, key: SettingKey, default: T) -> T {
        match self.get_value(key) {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!(key = %key, error = %e, "Stored setting has wrong type, using default");
                    default
                }
            },
            Ok(None) => default,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read setting, using default");
                default
            }
        }
    }

    /// Typed write; failures are logged and swallowed.
    pub fn set_setting<T: Serialize>(&self, key: SettingKey, value: &T) {
        let value = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to encode setting");
                return;
            }
        };
        if let Err(e) = self.set_value(key, value) {
            warn!(key = %key, error = %e, "Failed to persist setting");
        }
    }

    /// Load every setting, each falling back to its own default.
    pub fn load_settings(&self) -> Settings {
        let defaults = Settings::default();
        let is_dark_mode = self.get_setting(SettingKey::DarkMode, defaults.is_dark_mode);
        let mut settings = Settings {
            mode: self.get_setting(SettingKey::Mode, defaults.mode),
            language: self.get_setting(SettingKey::Language, defaults.language),
            is_dark_mode,
            theme: self.get_setting(SettingKey::Theme, Theme::for_dark_mode(is_dark_mode)),
            voice_enabled: self.get_setting(SettingKey::VoiceEnabled, defaults.voice_enabled),
            voice_speed: self.get_setting(SettingKey::VoiceSpeed, defaults.voice_speed),
            haptic_enabled: self.get_setting(SettingKey::HapticEnabled, defaults.haptic_enabled),
        };
        if !settings.is_theme_consistent() {
            warn!(
                theme = ?settings.theme,
                dark_mode = settings.is_dark_mode,
                "Stored theme disagrees with dark mode, following dark mode"
            );
            settings.theme = Theme::for_dark_mode(settings.is_dark_mode);
        }
        debug!(?settings, "Settings loaded");
        settings
    }

    /// Persist the listed keys of `settings`.
    pub fn save_settings(&self, settings: &Settings, keys: &[SettingKey]) {
        for key in keys {
            match key {
                SettingKey::Mode => self.set_setting(*key, &settings.mode),
                SettingKey::Language => self.set_setting(*key, &settings.language),
                SettingKey::DarkMode => self.set_setting(*key, &settings.is_dark_mode),
                SettingKey::Theme => self.set_setting(*key, &settings.theme),
                SettingKey::VoiceEnabled => self.set_setting(*key, &settings.voice_enabled),
                SettingKey::VoiceSpeed => self.set_setting(*key, &settings.voice_speed),
                SettingKey::HapticEnabled => self.set_setting(*key, &settings.haptic_enabled),
            }
        }
    }
}
