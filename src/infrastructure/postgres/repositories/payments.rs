use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::{
    domain::{
        entities::payments::{InsertPaymentEntity, PaymentEntity},
        repositories::payments::PaymentRepository,
        value_objects::payments::PaymentError,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::payments},
};

pub struct PaymentPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PaymentPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

/// The unique index on `idempotency_key` is the arbiter between concurrent
/// creates; we surface the loser as `Conflict` by kind, never by matching the
/// engine's message text.
fn map_write_error(err: DieselError) -> PaymentError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => PaymentError::Conflict,
        other => PaymentError::Storage(other.into()),
    }
}

fn map_read_error(err: DieselError) -> PaymentError {
    match err {
        DieselError::NotFound => PaymentError::NotFound,
        other => PaymentError::Storage(other.into()),
    }
}

#[async_trait]
impl PaymentRepository for PaymentPostgres {
    async fn create(&self, payment: InsertPaymentEntity) -> Result<i64, PaymentError> {
        let mut conn = Arc::clone(&self.db_pool)
            .get()
            .map_err(|err| PaymentError::Storage(err.into()))?;

        diesel::insert_into(payments::table)
            .values(&payment)
            .returning(payments::id)
            .get_result::<i64>(&mut conn)
            .map_err(map_write_error)
    }

    async fn find_by_idempotency_key(
        &self,
        idempotency_key: &str,
    ) -> Result<PaymentEntity, PaymentError> {
        let mut conn = Arc::clone(&self.db_pool)
            .get()
            .map_err(|err| PaymentError::Storage(err.into()))?;

        payments::table
            .filter(payments::idempotency_key.eq(idempotency_key))
            .select(PaymentEntity::as_select())
            .first::<PaymentEntity>(&mut conn)
            .map_err(map_read_error)
    }

    async fn find_by_public_id(&self, public_id: &str) -> Result<PaymentEntity, PaymentError> {
        let mut conn = Arc::clone(&self.db_pool)
            .get()
            .map_err(|err| PaymentError::Storage(err.into()))?;

        payments::table
            .filter(payments::public_id.eq(public_id))
            .select(PaymentEntity::as_select())
            .first::<PaymentEntity>(&mut conn)
            .map_err(map_read_error)
    }
}
