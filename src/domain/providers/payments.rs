use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::payments::PaymentError;

/// External settlement step. Runs on every create attempt, including
/// idempotent retries; failure means the gateway rejected the payment and no
/// record is persisted.
#[automock]
#[async_trait]
pub trait PaymentProvider {
    async fn process(&self, method: &str) -> Result<(), PaymentError>;
}
