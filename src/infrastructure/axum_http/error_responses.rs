use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::domain::value_objects::payments::PaymentError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            PaymentError::Validation { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            PaymentError::Provider(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            PaymentError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            // Recovered inside the create usecase; only reachable if a future
            // caller surfaces it directly.
            PaymentError::Conflict => (StatusCode::CONFLICT, self.to_string()),
            // Don't leak storage detail to the client. Retrying with the same
            // idempotency key is safe.
            PaymentError::InjectedFault | PaymentError::Storage(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "transient storage failure, retry with the same idempotency key".to_string(),
            ),
        };

        let body = Json(ErrorResponse {
            code: status.as_u16(),
            message,
        });

        (status, body).into_response()
    }
}
