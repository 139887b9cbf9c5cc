use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::{
    domain::{
        entities::payments::{InsertPaymentEntity, PaymentEntity},
        repositories::payments::PaymentRepository,
        value_objects::payments::PaymentError,
    },
    infrastructure::observability::metrics::Metrics,
};

/// Instrumentation decorator over any `PaymentRepository`: observes per
/// operation latency and counts errors, then forwards the inner result
/// untouched.
pub struct PaymentRepositoryMetrics<R>
where
    R: PaymentRepository + Send + Sync,
{
    next: R,
    metrics: Arc<Metrics>,
}

impl<R> PaymentRepositoryMetrics<R>
where
    R: PaymentRepository + Send + Sync,
{
    pub fn new(next: R, metrics: Arc<Metrics>) -> Self {
        Self { next, metrics }
    }

    fn observe<T>(
        &self,
        operation: &str,
        started_at: Instant,
        result: Result<T, PaymentError>,
    ) -> Result<T, PaymentError> {
        self.metrics
            .db_query_duration
            .with_label_values(&[operation])
            .observe(started_at.elapsed().as_secs_f64());

        if result.is_err() {
            self.metrics
                .db_errors
                .with_label_values(&[operation])
                .inc();
        }

        result
    }
}

#[async_trait]
impl<R> PaymentRepository for PaymentRepositoryMetrics<R>
where
    R: PaymentRepository + Send + Sync,
{
    async fn create(&self, payment: InsertPaymentEntity) -> Result<i64, PaymentError> {
        let started_at = Instant::now();
        let result = self.next.create(payment).await;
        self.observe("create", started_at, result)
    }

    async fn find_by_idempotency_key(
        &self,
        idempotency_key: &str,
    ) -> Result<PaymentEntity, PaymentError> {
        let started_at = Instant::now();
        let result = self.next.find_by_idempotency_key(idempotency_key).await;
        self.observe("find_by_idempotency_key", started_at, result)
    }

    async fn find_by_public_id(&self, public_id: &str) -> Result<PaymentEntity, PaymentError> {
        let started_at = Instant::now();
        let result = self.next.find_by_public_id(public_id).await;
        self.observe("find_by_public_id", started_at, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;

    use crate::domain::repositories::payments::MockPaymentRepository;

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
    async fn success_records_latency_without_error_count() {
        let metrics = Arc::new(Metrics::new().unwrap());
        let mut inner = MockPaymentRepository::new();
        inner.expect_create().times(1).returning(|_| Ok(3));

        let instrumented = PaymentRepositoryMetrics::new(inner, Arc::clone(&metrics));
        assert_eq!(instrumented.create(insert_entity()).await.unwrap(), 3);

        assert_eq!(
            metrics
                .db_query_duration
                .with_label_values(&["create"])
                .get_sample_count(),
            1
        );
        assert_eq!(metrics.db_errors.with_label_values(&["create"]).get(), 0);
    }

    #[tokio::test]
    async fn failure_counts_error_and_forwards_it_unchanged() {
        let metrics = Arc::new(Metrics::new().unwrap());
        let mut inner = MockPaymentRepository::new();
        inner
            .expect_find_by_public_id()
            .times(1)
            .returning(|_| Err(PaymentError::NotFound));

        let instrumented = PaymentRepositoryMetrics::new(inner, Arc::clone(&metrics));
        let err = instrumented
            .find_by_public_id("pay_missing")
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::NotFound));
        assert_eq!(
            metrics
                .db_errors
                .with_label_values(&["find_by_public_id"])
                .get(),
            1
        );
        assert_eq!(
            metrics
                .db_query_duration
                .with_label_values(&["find_by_public_id"])
                .get_sample_count(),
            1
        );
    }
}
