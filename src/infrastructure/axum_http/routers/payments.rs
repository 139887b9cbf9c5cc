use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    application::usercases::{create_payment::CreatePaymentUseCase, get_payment::GetPaymentUseCase},
    config::config_model::DotEnvyConfig,
    domain::{
        providers::payments::PaymentProvider,
        repositories::payments::PaymentRepository,
        value_objects::payments::{InsertPaymentModel, PaymentError, PaymentModel},
    },
    infrastructure::{
        axum_http::error_responses::ErrorResponse,
        observability::metrics::Metrics,
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{
                payments::PaymentPostgres, payments_chaos::PaymentRepositoryChaos,
                payments_metrics::PaymentRepositoryMetrics,
            },
        },
        provider::fake_payment_provider::FakePaymentProvider,
    },
};

pub struct PaymentsState<R, P>
where
    R: PaymentRepository + Send + Sync,
    P: PaymentProvider + Send + Sync,
{
    pub create_payment_usecase: CreatePaymentUseCase<R, P>,
    pub get_payment_usecase: GetPaymentUseCase<R>,
}

/// Decorator order: chaos outermost so injected latency is not measured as
/// query time. Either order would be correct.
type ChaosRepository = PaymentRepositoryChaos<PaymentRepositoryMetrics<PaymentPostgres>>;

pub fn routes(db_pool: Arc<PgPoolSquad>, config: &DotEnvyConfig, metrics: Arc<Metrics>) -> Router {
    let payment_repository = Arc::new(PaymentRepositoryChaos::new(
        PaymentRepositoryMetrics::new(PaymentPostgres::new(db_pool), Arc::clone(&metrics)),
        config.chaos.clone(),
    ));
    let payment_provider = Arc::new(FakePaymentProvider::new(config.provider.failure_probability));

    let state = Arc::new(PaymentsState {
        create_payment_usecase: CreatePaymentUseCase::new(
            Arc::clone(&payment_repository),
            payment_provider,
        ),
        get_payment_usecase: GetPaymentUseCase::new(payment_repository),
    });

    Router::new()
        .route(
            "/",
            post(create_payment::<ChaosRepository, FakePaymentProvider>),
        )
        .route(
            "/:public_id",
            get(get_payment::<ChaosRepository, FakePaymentProvider>),
        )
        .with_state(state)
}

pub async fn create_payment<R, P>(
    State(state): State<Arc<PaymentsState<R, P>>>,
    headers: HeaderMap,
    Json(insert_payment_model): Json<InsertPaymentModel>,
) -> impl IntoResponse
where
    R: PaymentRepository + Send + Sync + 'static,
    P: PaymentProvider + Send + Sync + 'static,
{
    let Some(idempotency_key) = headers
        .get("Idempotency-Key")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                code: StatusCode::BAD_REQUEST.as_u16(),
                message: "Idempotency-Key header is required".to_string(),
            }),
        )
            .into_response();
    };

    match state
        .create_payment_usecase
        .execute(insert_payment_model.into_create_model(idempotency_key))
        .await
    {
        Ok(created_payment_model) => {
            (StatusCode::ACCEPTED, Json(created_payment_model)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_payment<R, P>(
    State(state): State<Arc<PaymentsState<R, P>>>,
    Path(public_id): Path<String>,
) -> impl IntoResponse
where
    R: PaymentRepository + Send + Sync + 'static,
    P: PaymentProvider + Send + Sync + 'static,
{
    match state.get_payment_usecase.execute(&public_id).await {
        Ok(payment_entity) => match PaymentModel::try_from(payment_entity) {
            Ok(payment_model) => (StatusCode::OK, Json(payment_model)).into_response(),
            Err(err) => PaymentError::Storage(err).into_response(),
        },
        Err(err) => err.into_response(),
    }
}
