use std::path::PathBuf;

use crate::domain::{AppConfig, DomainError};

/// Port for the application configuration file and the directories
/// derived from it.
pub trait ConfigStore: Send + Sync {
    /// Load configuration, writing the defaults first if no file exists.
    fn load(&self) -> Result<AppConfig, DomainError>;

    /// Persist `config`.
    fn save(&self, config: &AppConfig) -> Result<(), DomainError>;

    fn config_path(&self) -> PathBuf;

    /// Root directory for everything the application writes.
    fn data_dir(&self) -> PathBuf;

    fn logs_dir(&self) -> PathBuf;

    /// Location of the user settings store named `file_name`.
    fn settings_path(&self, file_name: &str) -> PathBuf {
        self.data_dir().join(file_name)
    }
}
