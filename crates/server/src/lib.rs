//! symptom-server library crate
//!
//! Exposes `build_app` and `config` for integration tests.
//! The actual binary entrypoint is in `main.rs`.

pub mod ai;
pub mod config;
pub mod document;
mod error;
mod middleware;
pub mod pipeline;
mod routes;
pub mod store;

use std::sync::OnceLock;

use axum::{Extension, Router, middleware as axum_mw, routing::get};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use ai::ModelGateway;
use config::Config;
use pipeline::AnalysisPipeline;
use store::AnalysisStore;

/// Build the full application router with a fresh pipeline from `config`.
pub fn build_app(config: &Config) -> Router {
    let gateway = ModelGateway::from_api_key(config.groq_api_key.clone());
    let pipeline = AnalysisPipeline::new(gateway, AnalysisStore::new());
    build_app_with(pipeline, config)
}

/// Build the router around an existing pipeline.
///
/// Lets tests inject a gateway pointed at a stub completion endpoint.
pub fn build_app_with(pipeline: AnalysisPipeline, config: &Config) -> Router {
    let rate_limiter = middleware::create_rate_limiter(config.rate_limit_rps);

    let api_routes = Router::new()
        .nest("/api", routes::api_routes(config.max_upload_bytes))
        .layer(axum_mw::from_fn(middleware::rate_limit_middleware))
        .layer(Extension(rate_limiter));

    let ops_routes = Router::new()
        .route("/health", get(routes::ops::health))
        .route("/health-check", get(routes::ops::health))
        .route("/metrics", get(routes::ops::metrics))
        .layer(Extension(prometheus_handle()));

    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(ops_routes)
        .merge(api_routes)
        .with_state(pipeline)
        .layer(axum_mw::from_fn(middleware::audit_middleware))
        .layer(axum_mw::from_fn(middleware::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum_mw::from_fn(middleware::metrics_middleware))
}

/// Handle to the process-wide Prometheus recorder.
///
/// The recorder is installed once; every router built afterwards (e.g. in
/// integration tests) renders from that same recorder.
fn prometheus_handle() -> PrometheusHandle {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
    HANDLE
        .get_or_init(|| {
            let recorder = PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();
            if metrics::set_global_recorder(recorder).is_err() {
                tracing::warn!("A global metrics recorder was already installed");
            }
            handle
        })
        .clone()
}
