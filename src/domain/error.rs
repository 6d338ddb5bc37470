use thiserror::Error;

use crate::domain::status::AppStatus;

/// Domain-level errors for CurrencySense.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Settings storage error: {0}")]
    Storage(String),

    #[error("Recognition failed: {0}")]
    Recognition(String),

    #[error("Recognition timed out after {secs}s")]
    RecognitionTimeout { secs: u64 },

    #[error("Recognizer returned an invalid result: {0}")]
    InvalidRecognition(String),

    #[error("Cannot {operation} while {from}")]
    InvalidTransition {
        from: AppStatus,
        operation: &'static str,
    },

    #[error("Speech error: {0}")]
    Speech(String),

    #[error("Haptic error: {0}")]
    Haptic(String),

    #[error("HTTP request failed: {0}")]
    HttpRequest(String),
}

impl DomainError {
    /// Whether this error belongs to the single user-visible recognition
    /// failure kind.
    pub fn is_recognition_failure(&self) -> bool {
        matches!(
            self,
            DomainError::Recognition(_)
                | DomainError::RecognitionTimeout { .. }
                | DomainError::InvalidRecognition(_)
        )
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for DomainError {
    fn from(err: toml::de::Error) -> Self {
        DomainError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for DomainError {
    fn from(err: toml::ser::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognition_failure_kinds() {
        assert!(DomainError::Recognition("model".into()).is_recognition_failure());
        assert!(DomainError::RecognitionTimeout { secs: 30 }.is_recognition_failure());
        assert!(DomainError::InvalidRecognition("nan".into()).is_recognition_failure());
        assert!(!DomainError::Storage("disk full".into()).is_recognition_failure());
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = DomainError::InvalidTransition {
            from: AppStatus::Settings,
            operation: "process a captured image",
        };
        assert_eq!(err.to_string(), "Cannot process a captured image while settings");
    }
}
