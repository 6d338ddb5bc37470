use std::time::Duration;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::domain::config::RecognitionConfig;
use crate::domain::{CapturedImage, DomainError, RecognitionResult};
use crate::ports::{Recognizer, RecognizerCapabilities};

/// Banknotes in circulation that the simulator picks from.
pub const DENOMINATIONS: [&str; 7] = ["10", "20", "50", "100", "200", "500", "2000"];

const CURRENCY: &str = "Indian Rupee";

/// Placeholder recognizer that guesses a random denomination.
///
/// It stands in for a real model: latency is simulated and the image is
/// never inspected beyond rejecting an empty payload.
pub struct SimulatedRecognizer {
    delay: Duration,
    preload_delay: Duration,
}

impl SimulatedRecognizer {
    pub fn new(config: &RecognitionConfig) -> Self {
        info!(
            delay_ms = config.simulated_delay_ms,
            "SimulatedRecognizer created"
        );
        Self {
            delay: Duration::from_millis(config.simulated_delay_ms),
            preload_delay: Duration::from_millis(config.preload_delay_ms),
        }
    }

    fn guess() -> RecognitionResult {
        let mut rng = rand::thread_rng();
        let denomination = DENOMINATIONS.choose(&mut rng).copied().unwrap_or("100");
        let confidence = rng.gen_range(0.75f32..0.99);
        RecognitionResult::new(CURRENCY, denomination, confidence)
    }
}

#[async_trait]
impl Recognizer for SimulatedRecognizer {
    async fn recognize(&self, image: &CapturedImage) -> Result<RecognitionResult, DomainError> {
        if image.is_empty() {
            return Err(DomainError::Recognition("empty image".to_string()));
        }

        debug!(bytes = image.len(), "Simulating recognition");
        tokio::time::sleep(self.delay).await;

        let result = Self::guess();
        debug!(
            denomination = %result.denomination,
            confidence = result.confidence,
            "Simulated recognition complete"
        );
        Ok(result)
    }

    async fn preload(&self) -> Result<(), DomainError> {
        tokio::time::sleep(self.preload_delay).await;
        info!("Recognition model preloaded");
        Ok(())
    }

    fn capabilities(&self) -> RecognizerCapabilities {
        RecognizerCapabilities {
            name: "Simulated".to_string(),
            currencies: vec![CURRENCY.to_string()],
            requires_network: false,
        }
    }
}
