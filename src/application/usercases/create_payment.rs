use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::payments::InsertPaymentEntity,
    providers::payments::PaymentProvider,
    repositories::payments::PaymentRepository,
    value_objects::{
        enums::payment_statuses::PaymentStatus,
        payments::{CreatePaymentModel, CreatedPaymentModel, PaymentError},
    },
};

pub struct CreatePaymentUseCase<R, P>
where
    R: PaymentRepository + Send + Sync,
    P: PaymentProvider + Send + Sync,
{
    payment_repository: Arc<R>,
    payment_provider: Arc<P>,
}

impl<R, P> CreatePaymentUseCase<R, P>
where
    R: PaymentRepository + Send + Sync,
    P: PaymentProvider + Send + Sync,
{
    pub fn new(payment_repository: Arc<R>, payment_provider: Arc<P>) -> Self {
        Self {
            payment_repository,
            payment_provider,
        }
    }

    pub async fn execute(
        &self,
        create_payment_model: CreatePaymentModel,
    ) -> Result<CreatedPaymentModel, PaymentError> {
        validate_create_payment(&create_payment_model)?;

        info!(
            order_id = %create_payment_model.order_id,
            method = %create_payment_model.method,
            "create_payment: processing with provider"
        );

        // Deliberately not gated by the idempotency check: a retry that loses
        // the insert race below still pays the provider call. Duplicate rows
        // never happen; duplicate provider calls can.
        self.payment_provider
            .process(&create_payment_model.method)
            .await
            .map_err(|err| {
                warn!(
                    order_id = %create_payment_model.order_id,
                    error = %err,
                    "create_payment: provider rejected payment"
                );
                err
            })?;

        let now = Utc::now();
        let insert_payment_entity = InsertPaymentEntity {
            public_id: format!("pay_{}", Uuid::new_v4()),
            order_id: create_payment_model.order_id.clone(),
            payer_id: create_payment_model.payer_id,
            amount: create_payment_model.amount,
            currency: create_payment_model.currency.clone(),
            status: PaymentStatus::Pending.to_string(),
            provider: create_payment_model.provider.clone(),
            method: create_payment_model.method.clone(),
            idempotency_key: create_payment_model.idempotency_key.clone(),
            created_at: now,
            updated_at: now,
        };
        let public_id = insert_payment_entity.public_id.clone();

        match self.payment_repository.create(insert_payment_entity).await {
            Ok(_) => {
                info!(
                    payment_id = %public_id,
                    "create_payment: payment recorded"
                );

                Ok(CreatedPaymentModel {
                    payment_id: public_id,
                    status: PaymentStatus::Pending,
                })
            }

            // Storage already holds a record for this key: the retry is
            // idempotent, answer with the original record.
            Err(PaymentError::Conflict) => {
                info!(
                    idempotency_key = %create_payment_model.idempotency_key,
                    "create_payment: idempotency key already persisted, resolving to existing record"
                );

                let existing = self
                    .payment_repository
                    .find_by_idempotency_key(&create_payment_model.idempotency_key)
                    .await
                    .map_err(|err| {
                        error!(
                            idempotency_key = %create_payment_model.idempotency_key,
                            db_error = ?err,
                            "create_payment: failed to load existing record after conflict"
                        );
                        err
                    })?;

                let status = PaymentStatus::try_from(existing.status.as_str())?;

                Ok(CreatedPaymentModel {
                    payment_id: existing.public_id,
                    status,
                })
            }

            Err(err) => {
                error!(
                    order_id = %create_payment_model.order_id,
                    db_error = ?err,
                    "create_payment: failed to persist payment"
                );
                Err(err)
            }
        }
    }
}

fn validate_create_payment(model: &CreatePaymentModel) -> Result<(), PaymentError> {
    if model.amount <= 0 {
        return Err(PaymentError::Validation {
            field: "amount",
            message: "amount must be greater than zero",
        });
    }
    if model.currency.is_empty() {
        return Err(PaymentError::Validation {
            field: "currency",
            message: "currency is required",
        });
    }
    if model.method.is_empty() {
        return Err(PaymentError::Validation {
            field: "method",
            message: "payment method is required",
        });
    }
    if model.provider.is_empty() {
        return Err(PaymentError::Validation {
            field: "provider",
            message: "payment provider is required",
        });
    }
    if model.idempotency_key.is_empty() {
        return Err(PaymentError::Validation {
            field: "idempotency_key",
            message: "idempotency key is required",
        });
    }
    Ok(())
}
