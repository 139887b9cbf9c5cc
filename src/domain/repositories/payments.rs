use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::payments::{InsertPaymentEntity, PaymentEntity};
use crate::domain::value_objects::payments::PaymentError;

/// Storage port for payment records. `create` is a single atomic insert:
/// storage arbitrates idempotency-key uniqueness and reports the loser with
/// `PaymentError::Conflict`.
#[automock]
#[async_trait]
pub trait PaymentRepository {
    async fn create(&self, payment: InsertPaymentEntity) -> Result<i64, PaymentError>;

    async fn find_by_idempotency_key(
        &self,
        idempotency_key: &str,
    ) -> Result<PaymentEntity, PaymentError>;

    async fn find_by_public_id(&self, public_id: &str) -> Result<PaymentEntity, PaymentError>;
}
