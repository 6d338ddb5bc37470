use serde::{Deserialize, Serialize};

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Enable file logging with rotation.
    pub file_logging: bool,
    /// Maximum number of log files to keep.
    pub max_files: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: true,
            max_files: 7,
        }
    }
}

/// Recognition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Upper bound on a single recognition call before it counts as failed.
    pub timeout_secs: u64,
    /// Artificial latency of the simulated recognizer.
    pub simulated_delay_ms: u64,
    /// Artificial warm-up time of the simulated recognizer.
    pub preload_delay_ms: u64,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            simulated_delay_ms: 1500,
            preload_delay_ms: 500,
        }
    }
}

/// Connectivity probing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectivityConfig {
    /// URL hit with a HEAD request; any response means online.
    pub check_url: String,
    /// Timeout for a single check.
    pub check_timeout_secs: u64,
    /// Background polling interval; 0 disables polling.
    pub poll_interval_secs: u64,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            check_url: "https://httpbin.org/status/200".to_string(),
            check_timeout_secs: 5,
            poll_interval_secs: 30,
        }
    }
}

/// Settings storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// File name, relative to the data directory, of the settings store.
    pub settings_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            settings_file: "settings.json".to_string(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub recognition: RecognitionConfig,
    pub connectivity: ConnectivityConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Create a new AppConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [recognition]
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.recognition.timeout_secs, 5);
        assert_eq!(config.recognition.simulated_delay_ms, 1500);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.storage.settings_file, "settings.json");
    }
}
