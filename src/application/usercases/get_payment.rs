use std::sync::Arc;

use tracing::warn;

use crate::domain::{
    entities::payments::PaymentEntity,
    repositories::payments::PaymentRepository,
    value_objects::payments::PaymentError,
};

pub struct GetPaymentUseCase<R>
where
    R: PaymentRepository + Send + Sync,
{
    payment_repository: Arc<R>,
}

impl<R> GetPaymentUseCase<R>
where
    R: PaymentRepository + Send + Sync,
{
    pub fn new(payment_repository: Arc<R>) -> Self {
        Self { payment_repository }
    }

    pub async fn execute(&self, public_id: &str) -> Result<PaymentEntity, PaymentError> {
        self.payment_repository
            .find_by_public_id(public_id)
            .await
            .map_err(|err| {
                warn!(
                    %public_id,
                    error = %err,
                    "get_payment: lookup failed"
                );
                err
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;

    use crate::domain::repositories::payments::MockPaymentRepository;

    #[tokio::test]
    async fn returns_record_for_known_public_id() {
        let now = Utc::now();
        let mut repository = MockPaymentRepository::new();
        repository
            .expect_find_by_public_id()
            .withf(|public_id| public_id == "pay_abc")
            .times(1)
            .returning(move |_| {
                Ok(PaymentEntity {
                    id: 7,
                    public_id: "pay_abc".to_string(),
                    order_id: "order_9".to_string(),
                    payer_id: 3,
                    amount: 500,
                    currency: "USD".to_string(),
                    status: "SUCCESS".to_string(),
                    provider: "FAKE".to_string(),
                    method: "ewallet".to_string(),
                    idempotency_key: "K9".to_string(),
                    created_at: now,
                    updated_at: now,
                    paid_at: Some(now),
                })
            });

        let usecase = GetPaymentUseCase::new(Arc::new(repository));
        let payment = usecase.execute("pay_abc").await.unwrap();

        assert_eq!(payment.public_id, "pay_abc");
        assert_eq!(payment.status, "SUCCESS");
        assert!(payment.paid_at.is_some());
    }

    #[tokio::test]
    async fn propagates_not_found() {
        let mut repository = MockPaymentRepository::new();
        repository
            .expect_find_by_public_id()
            .times(1)
            .returning(|_| Err(PaymentError::NotFound));

        let usecase = GetPaymentUseCase::new(Arc::new(repository));
        let err = usecase.execute("pay_missing").await.unwrap_err();
        assert!(matches!(err, PaymentError::NotFound));
    }
}
