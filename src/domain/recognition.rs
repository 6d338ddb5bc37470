use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain::DomainError;

/// Outcome of a successful banknote recognition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    /// Currency name, e.g. "Indian Rupee".
    pub currency: String,
    /// Face value as printed, e.g. "100".
    pub denomination: String,
    /// Model confidence in [0, 1].
    pub confidence: f32,
}

impl RecognitionResult {
    pub fn new(
        currency: impl Into<String>,
        denomination: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self {
            currency: currency.into(),
            denomination: denomination.into(),
            confidence,
        }
    }

    /// Accept any well-formed result; reject ones a recognizer should never
    /// produce.
    pub fn validate(self) -> Result<Self, DomainError> {
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(DomainError::InvalidRecognition(format!(
                "confidence {} outside [0, 1]",
                self.confidence
            )));
        }
        if self.denomination.trim().is_empty() || self.currency.trim().is_empty() {
            return Err(DomainError::InvalidRecognition(
                "empty denomination or currency".to_string(),
            ));
        }
        Ok(self)
    }

    /// Short spoken/displayed form: "<denomination> <currency>".
    pub fn headline(&self) -> String {
        format!("{} {}", self.denomination, self.currency)
    }

    /// Confidence rounded to a whole percentage.
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence * 100.0).round().clamp(0.0, 100.0) as u8
    }

    /// Long spoken form used when the user asks to hear the result again.
    pub fn spoken_summary(&self) -> String {
        format!(
            "Identified {} with {}% confidence",
            self.headline(),
            self.confidence_percent()
        )
    }
}

/// Encoded camera frame (typically a JPEG data URL).
///
/// The payload is zeroed when dropped so frames never linger in memory
/// after the state machine releases them.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct CapturedImage(String);

impl CapturedImage {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CapturedImage({} bytes)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_low_confidence() {
        let result = RecognitionResult::new("Indian Rupee", "50", 0.42);
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_confidence() {
        assert!(RecognitionResult::new("Indian Rupee", "50", 1.3).validate().is_err());
        assert!(RecognitionResult::new("Indian Rupee", "50", -0.1).validate().is_err());
        assert!(RecognitionResult::new("Indian Rupee", "50", f32::NAN).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        assert!(RecognitionResult::new("Indian Rupee", " ", 0.9).validate().is_err());
        assert!(RecognitionResult::new("", "10", 0.9).validate().is_err());
    }

    #[test]
    fn test_headline_and_percent() {
        let result = RecognitionResult::new("Indian Rupee", "100", 0.954);
        assert_eq!(result.headline(), "100 Indian Rupee");
        assert_eq!(result.confidence_percent(), 95);
        assert_eq!(
            result.spoken_summary(),
            "Identified 100 Indian Rupee with 95% confidence"
        );
    }

    #[test]
    fn test_captured_image_debug_hides_payload() {
        let image = CapturedImage::new("data:image/jpeg;base64,AAAA");
        let debug = format!("{:?}", image);
        assert!(!debug.contains("base64"));
        assert!(debug.contains("27 bytes"));
    }
}
