use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::infrastructure::observability::metrics::Metrics;

/// Records request count and latency per method/path/status. Fire-and-forget;
/// never fails the request.
pub async fn track_metrics(
    State(metrics): State<Arc<Metrics>>,
    request: Request,
    next: Next,
) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    // Matched route template, not the raw URI, to keep label cardinality down.
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    let labels = [method.as_str(), path.as_str(), status.as_str()];

    metrics.http_requests.with_label_values(&labels).inc();
    metrics
        .http_request_duration
        .with_label_values(&labels)
        .observe(started_at.elapsed().as_secs_f64());

    response
}

pub async fn export_metrics(State(metrics): State<Arc<Metrics>>) -> impl IntoResponse {
    match metrics.export() {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(err) => {
            error!(error = %err, "metrics: export failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics export failed").into_response()
        }
    }
}
