//! Stored analysis lookups

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use symptom_core::AnalysisResult;
use uuid::Uuid;

use crate::error::AppError;
use crate::pipeline::AnalysisPipeline;

/// Response body for the analysis listing
#[derive(Serialize)]
pub struct AnalysisList {
    analyses: Vec<AnalysisResult>,
}

/// GET /api/analyses - All stored analyses, oldest first
pub async fn list(State(pipeline): State<AnalysisPipeline>) -> Json<AnalysisList> {
    Json(AnalysisList {
        analyses: pipeline.list().await,
    })
}

/// GET /api/analyses/{id} - A single stored analysis
///
/// Ids that are not UUIDs cannot exist, so they are reported as not found.
pub async fn read(
    State(pipeline): State<AnalysisPipeline>,
    Path(id): Path<String>,
) -> Result<Json<AnalysisResult>, AppError> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| AppError::NotFound("Analysis not found".to_string()))?;

    Ok(Json(pipeline.get(id).await?))
}
