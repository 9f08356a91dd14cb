mod analyses;
mod analyze;
mod chat;
pub mod ops;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::pipeline::AnalysisPipeline;

/// Build the analysis API routes
pub fn api_routes(max_upload_bytes: usize) -> Router<AnalysisPipeline> {
    Router::new()
        .route("/analyze/symptoms", post(analyze::symptoms))
        .route(
            "/analyze/report",
            post(analyze::report).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/chat", post(chat::send))
        .route("/analyses", get(analyses::list))
        .route("/analyses/{id}", get(analyses::read))
}
