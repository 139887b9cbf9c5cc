use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{
    config::config_model::ChaosConfig,
    domain::{
        entities::payments::{InsertPaymentEntity, PaymentEntity},
        repositories::payments::PaymentRepository,
        value_objects::payments::PaymentError,
    },
};

/// Fault-injection decorator over any `PaymentRepository`. Each operation may
/// first be delayed, then replaced with `InjectedFault` before the inner
/// repository runs. Call semantics are otherwise untouched, so it can sit
/// above or below the metrics decorator.
pub struct PaymentRepositoryChaos<R>
where
    R: PaymentRepository + Send + Sync,
{
    next: R,
    config: ChaosConfig,
    rng: Mutex<StdRng>,
}

impl<R> PaymentRepositoryChaos<R>
where
    R: PaymentRepository + Send + Sync,
{
    pub fn new(next: R, config: ChaosConfig) -> Self {
        Self::with_rng(next, config, StdRng::from_entropy())
    }

    /// Seedable constructor so tests can make the decorator deterministic.
    pub fn with_rng(next: R, config: ChaosConfig, rng: StdRng) -> Self {
        Self {
            next,
            config,
            rng: Mutex::new(rng),
        }
    }

    async fn inject(&self) -> Result<(), PaymentError> {
        if !self.config.enabled {
            return Ok(());
        }

        // Draw everything up front so the lock is released before suspending.
        let (delay, fail) = {
            let mut rng = self.rng.lock().expect("chaos rng lock poisoned");

            let max_delay_ms = self.config.max_delay.as_millis() as u64;
            let delay = if max_delay_ms > 0 && rng.r#gen::<f64>() < self.config.delay_probability {
                Some(Duration::from_millis(rng.gen_range(0..max_delay_ms)))
            } else {
                None
            };
            let fail = rng.r#gen::<f64>() < self.config.error_probability;

            (delay, fail)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if fail {
            return Err(PaymentError::InjectedFault);
        }

        Ok(())
    }
}

#[async_trait]
impl<R> PaymentRepository for PaymentRepositoryChaos<R>
where
    R: PaymentRepository + Send + Sync,
{
    async fn create(&self, payment: InsertPaymentEntity) -> Result<i64, PaymentError> {
        self.inject().await?;
        self.next.create(payment).await
    }

    async fn find_by_idempotency_key(
        &self,
        idempotency_key: &str,
    ) -> Result<PaymentEntity, PaymentError> {
        self.inject().await?;
        self.next.find_by_idempotency_key(idempotency_key).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> Result<PaymentEntity, PaymentError> {
        self.inject().await?;
        self.next.find_by_public_id(public_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;

    use crate::domain::repositories::payments::MockPaymentRepository;

    fn config(enabled: bool, error_probability: f64, delay_probability: f64) -> ChaosConfig {
        ChaosConfig {
            enabled,
            error_probability,
            delay_probability,
            max_delay: Duration::from_millis(1),
        }
    }

    fn insert_entity() -> InsertPaymentEntity {
        let now = Utc::now();
        InsertPaymentEntity {
            public_id: "pay_test".to_string(),
            order_id: "order_1".to_string(),
            payer_id: 1,
            amount: 100,
            currency: "USD".to_string(),
            status: "PENDING".to_string(),
            provider: "FAKE".to_string(),
            method: "credit_card".to_string(),
            idempotency_key: "K1".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn certain_error_probability_never_reaches_inner_repository() {
        let mut inner = MockPaymentRepository::new();
        inner.expect_create().times(0);
        inner.expect_find_by_idempotency_key().times(0);
        inner.expect_find_by_public_id().times(0);

        let chaos = PaymentRepositoryChaos::with_rng(
            inner,
            config(true, 1.0, 0.0),
            StdRng::seed_from_u64(42),
        );

        assert!(matches!(
            chaos.create(insert_entity()).await.unwrap_err(),
            PaymentError::InjectedFault
        ));
        assert!(matches!(
            chaos.find_by_idempotency_key("K1").await.unwrap_err(),
            PaymentError::InjectedFault
        ));
        assert!(matches!(
            chaos.find_by_public_id("pay_test").await.unwrap_err(),
            PaymentError::InjectedFault
        ));
    }

    #[tokio::test]
    async fn disabled_decorator_is_a_passthrough() {
        let mut inner = MockPaymentRepository::new();
        inner.expect_create().times(1).returning(|_| Ok(9));

        let chaos = PaymentRepositoryChaos::with_rng(
            inner,
            config(false, 1.0, 1.0),
            StdRng::seed_from_u64(42),
        );

        assert_eq!(chaos.create(insert_entity()).await.unwrap(), 9);
    }

    #[tokio::test]
    async fn zero_error_probability_delegates_and_preserves_result() {
        let mut inner = MockPaymentRepository::new();
        inner
            .expect_find_by_public_id()
            .times(1)
            .returning(|_| Err(PaymentError::NotFound));

        // delay_probability 1.0: still delegates after the sleep.
        let chaos = PaymentRepositoryChaos::with_rng(
            inner,
            config(true, 0.0, 1.0),
            StdRng::seed_from_u64(7),
        );

        assert!(matches!(
            chaos.find_by_public_id("pay_missing").await.unwrap_err(),
            PaymentError::NotFound
        ));
    }
}
