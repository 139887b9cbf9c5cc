use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::entities::payments::PaymentEntity;
use crate::domain::value_objects::enums::payment_statuses::PaymentStatus;

/// Everything the create orchestrator needs for one logical payment. The
/// idempotency key comes from the `Idempotency-Key` header, the rest from the
/// request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentModel {
    pub order_id: String,
    pub payer_id: i64,
    pub amount: i64,
    pub currency: String,
    pub provider: String,
    pub method: String,
    pub idempotency_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertPaymentModel {
    pub order_id: String,
    pub payer_id: i64,
    pub amount: i64,
    pub currency: String,
    pub provider: String,
    pub method: String,
}

impl InsertPaymentModel {
    pub fn into_create_model(self, idempotency_key: String) -> CreatePaymentModel {
        CreatePaymentModel {
            order_id: self.order_id,
            payer_id: self.payer_id,
            amount: self.amount,
            currency: self.currency,
            provider: self.provider,
            method: self.method,
            idempotency_key,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatedPaymentModel {
    pub payment_id: String,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentModel {
    pub payment_id: String,
    pub order_id: String,
    pub payer_id: i64,
    pub amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub provider: String,
    pub method: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
}

impl TryFrom<PaymentEntity> for PaymentModel {
    type Error = anyhow::Error;

    fn try_from(entity: PaymentEntity) -> Result<Self> {
        let status = PaymentStatus::try_from(entity.status.as_str())?;

        Ok(PaymentModel {
            payment_id: entity.public_id,
            order_id: entity.order_id,
            payer_id: entity.payer_id,
            amount: entity.amount,
            currency: entity.currency,
            status,
            provider: entity.provider,
            method: entity.method,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            paid_at: entity.paid_at,
        })
    }
}

/// Error taxonomy for the payment pipeline. `Conflict` is recovered inside
/// the create orchestrator and never reaches the HTTP boundary on that path;
/// everything else propagates unchanged to the caller.
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("provider rejected payment: {0}")]
    Provider(String),

    #[error("idempotency key already persisted")]
    Conflict,

    #[error("payment not found")]
    NotFound,

    #[error("chaos: injected error")]
    InjectedFault,

    #[error("storage failure")]
    Storage(#[from] anyhow::Error),
}
