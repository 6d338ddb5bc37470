use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{CapturedImage, DomainError, RecognitionResult};

/// Capabilities of a recognition backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizerCapabilities {
    /// Backend name for display.
    pub name: String,
    /// Currencies the backend can identify.
    pub currencies: Vec<String>,
    /// Whether the backend requires network access.
    pub requires_network: bool,
}

/// Port for banknote recognition.
///
/// Implementations own any retry, cancellation or model lifecycle policy;
/// the controller only bounds each call with a timeout.
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Identify the banknote in `image`.
    async fn recognize(&self, image: &CapturedImage) -> Result<RecognitionResult, DomainError>;

    /// Warm up the backend so the first recognition is fast.
    ///
    /// An error means this device cannot run recognition.
    async fn preload(&self) -> Result<(), DomainError>;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> RecognizerCapabilities;
}
