use crate::domain::{DomainError, SpeechRequest};

/// Port for text-to-speech output.
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak `request`, interrupting anything currently being spoken.
    fn speak(&self, request: &SpeechRequest) -> Result<(), DomainError>;

    /// Stop any ongoing speech.
    fn stop(&self) -> Result<(), DomainError>;
}
