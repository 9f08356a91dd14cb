//! Operational endpoints: health and Prometheus metrics

use axum::{Extension, Json, extract::State, response::IntoResponse};
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;

use crate::pipeline::AnalysisPipeline;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: DateTime<Utc>,
    /// `live` when a completion API key is configured, `fallback` otherwise
    model_mode: &'static str,
    /// Analyses held in the in-process store
    stored_analyses: usize,
}

/// GET /health (alias /health-check) - Report liveness, model mode and store size
pub async fn health(State(pipeline): State<AnalysisPipeline>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        model_mode: pipeline.gateway().mode(),
        stored_analyses: pipeline.stored_count().await,
    })
}

/// GET /metrics - Render collected metrics in Prometheus text format
pub async fn metrics(Extension(handle): Extension<PrometheusHandle>) -> impl IntoResponse {
    handle.render()
}
