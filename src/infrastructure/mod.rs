pub mod axum_http;
pub mod observability;
pub mod postgres;
pub mod provider;
