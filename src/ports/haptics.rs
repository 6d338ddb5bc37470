use std::time::Duration;

use crate::domain::DomainError;

/// Port for vibration feedback.
pub trait HapticDevice: Send + Sync {
    /// Vibrate with alternating on/off durations, starting with "on".
    fn vibrate(&self, pattern: &[Duration]) -> Result<(), DomainError>;

    /// Stop any ongoing vibration.
    fn stop(&self) -> Result<(), DomainError>;
}
