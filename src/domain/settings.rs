use serde::{Deserialize, Serialize};

/// Form factor the UI is laid out for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    #[default]
    Mobile,
    Wearable,
}

/// Interface and announcement language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Tamil,
    Telugu,
    Bengali,
}

impl Language {
    /// BCP-47 tag used to pick a speech voice.
    pub fn speech_locale(&self) -> &'static str {
        match self {
            Language::English => "en-IN",
            Language::Hindi => "hi-IN",
            Language::Tamil => "ta-IN",
            Language::Telugu => "te-IN",
            Language::Bengali => "bn-IN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    HighContrast,
}

impl Theme {
    /// Theme that matches a dark-mode flag.
    pub fn for_dark_mode(is_dark_mode: bool) -> Self {
        if is_dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl VoiceSpeed {
    /// Speech synthesis rate multiplier.
    pub fn rate(&self) -> f32 {
        match self {
            VoiceSpeed::Slow => 0.8,
            VoiceSpeed::Normal => 1.0,
            VoiceSpeed::Fast => 1.2,
        }
    }
}

/// Keys under which individual settings are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Mode,
    Language,
    DarkMode,
    Theme,
    VoiceEnabled,
    VoiceSpeed,
    HapticEnabled,
}

impl SettingKey {
    pub const ALL: [SettingKey; 7] = [
        SettingKey::Mode,
        SettingKey::Language,
        SettingKey::DarkMode,
        SettingKey::Theme,
        SettingKey::VoiceEnabled,
        SettingKey::VoiceSpeed,
        SettingKey::HapticEnabled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::Mode => "mode",
            SettingKey::Language => "language",
            SettingKey::DarkMode => "darkMode",
            SettingKey::Theme => "theme",
            SettingKey::VoiceEnabled => "voiceEnabled",
            SettingKey::VoiceSpeed => "voiceSpeed",
            SettingKey::HapticEnabled => "hapticEnabled",
        }
    }
}

impl std::fmt::Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User preferences, persisted across sessions.
///
/// `theme` and `is_dark_mode` agree (dark <-> Dark, light <-> Light)
/// except when the theme is high-contrast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub mode: AppMode,
    pub language: Language,
    pub is_dark_mode: bool,
    pub theme: Theme,
    pub voice_enabled: bool,
    pub voice_speed: VoiceSpeed,
    pub haptic_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: AppMode::default(),
            language: Language::default(),
            is_dark_mode: false,
            theme: Theme::Light,
            voice_enabled: true,
            voice_speed: VoiceSpeed::default(),
            haptic_enabled: true,
        }
    }
}

impl Settings {
    /// Flip dark mode, dragging the theme along unless it is high-contrast.
    ///
    /// Returns the keys that changed.
    pub fn toggle_dark_mode(&mut self) -> Vec<SettingKey> {
        self.is_dark_mode = !self.is_dark_mode;
        let mut changed = vec![SettingKey::DarkMode];
        if self.theme != Theme::HighContrast {
            self.theme = Theme::for_dark_mode(self.is_dark_mode);
            changed.push(SettingKey::Theme);
        }
        changed
    }

    /// Set the theme, keeping `is_dark_mode` consistent with it.
    ///
    /// Returns the keys that changed.
    pub fn set_theme(&mut self, theme: Theme) -> Vec<SettingKey> {
        let mut changed = Vec::new();
        if self.theme != theme {
            self.theme = theme;
            changed.push(SettingKey::Theme);
        }
        let dark = match theme {
            Theme::Light => Some(false),
            Theme::Dark => Some(true),
            Theme::HighContrast => None,
        };
        if let Some(dark) = dark {
            if self.is_dark_mode != dark {
                self.is_dark_mode = dark;
                changed.push(SettingKey::DarkMode);
            }
        }
        changed
    }

    /// Whether the theme/dark-mode pair is coherent.
    pub fn is_theme_consistent(&self) -> bool {
        match self.theme {
            Theme::HighContrast => true,
            theme => theme == Theme::for_dark_mode(self.is_dark_mode),
        }
    }

    /// Rate to speak at for the configured voice speed.
    pub fn speech_rate(&self) -> f32 {
        self.voice_speed.rate()
    }
}
