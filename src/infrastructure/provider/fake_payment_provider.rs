use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{providers::payments::PaymentProvider, value_objects::payments::PaymentError};

/// Gateway stand-in: method-dependent latency plus an independent failure
/// probability. No real settlement happens here.
pub struct FakePaymentProvider {
    failure_probability: f64,
    rng: Mutex<StdRng>,
}

impl FakePaymentProvider {
    pub fn new(failure_probability: f64) -> Self {
        Self::with_rng(failure_probability, StdRng::from_entropy())
    }

    pub fn with_rng(failure_probability: f64, rng: StdRng) -> Self {
        Self {
            failure_probability,
            rng: Mutex::new(rng),
        }
    }

    fn settlement_delay(method: &str) -> Option<Duration> {
        match method {
            "credit_card" => Some(Duration::from_millis(100)),
            "bank_transfer" => Some(Duration::from_millis(200)),
            "ewallet" => Some(Duration::from_millis(400)),
            _ => None,
        }
    }
}

#[async_trait]
impl PaymentProvider for FakePaymentProvider {
    async fn process(&self, method: &str) -> Result<(), PaymentError> {
        if let Some(delay) = Self::settlement_delay(method) {
            tokio::time::sleep(delay).await;
        }

        let failed = {
            let mut rng = self.rng.lock().expect("provider rng lock poisoned");
            rng.r#gen::<f64>() < self.failure_probability
        };

        if failed {
            return Err(PaymentError::Provider("provider failure".to_string()));
        }

        Ok(())
    }
}
