//! Prometheus metrics collection middleware
//!
//! Records `http_requests_total` and `http_request_duration_seconds` for every
//! request, labelled by method, route and status.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Collapse per-analysis paths so lookups share one label.
/// Anything after `/api/analyses/` is an id, valid UUID or not.
fn route_label(path: &str) -> String {
    match path.strip_prefix("/api/analyses/") {
        Some(rest) if !rest.is_empty() => "/api/analyses/:id".to_string(),
        _ => path.to_string(),
    }
}

/// Middleware that records request count and duration metrics.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let route = route_label(request.uri().path());

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();

    metrics::counter!(
        "http_requests_total",
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => status
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "route" => route
    )
    .record(duration);

    response
}
