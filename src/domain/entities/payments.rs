use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::infrastructure::postgres::schema::payments;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = payments)]
pub struct PaymentEntity {
    pub id: i64,
    pub public_id: String,
    pub order_id: String,
    pub payer_id: i64,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub provider: String,
    pub method: String,
    pub idempotency_key: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payments)]
pub struct InsertPaymentEntity {
    pub public_id: String,
    pub order_id: String,
    pub payer_id: i64,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub provider: String,
    pub method: String,
    pub idempotency_key: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
