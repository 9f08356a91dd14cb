//! Symptom and medical report analysis handlers

use axum::{
    Json,
    extract::{
        State,
        multipart::{Multipart, MultipartRejection},
        rejection::JsonRejection,
    },
};
use symptom_core::{AnalysisResult, DocumentAnalysis, SymptomInput};

use crate::error::AppError;
use crate::pipeline::AnalysisPipeline;

/// Multipart field carrying the uploaded report
const FILE_FIELD: &str = "file";

/// POST /api/analyze/symptoms - Analyze a structured symptom description
pub async fn symptoms(
    State(pipeline): State<AnalysisPipeline>,
    payload: Result<Json<SymptomInput>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(input) = payload?;
    input.validate()?;

    tracing::info!(
        symptoms = input.symptoms.len(),
        severity = %input.severity,
        "Symptom analysis request"
    );

    Ok(Json(pipeline.analyze_symptoms(input).await))
}

/// POST /api/analyze/report - Upload a PDF report and get a plain-language summary
pub async fn report(
    State(pipeline): State<AnalysisPipeline>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<DocumentAnalysis>, AppError> {
    let mut multipart =
        multipart.map_err(|e| AppError::BadRequest(format!("Invalid upload: {}", e.body_text())))?;

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        if !is_pdf_name(&filename) {
            return Err(AppError::BadRequest(
                "Only PDF files are supported".to_string(),
            ));
        }
        let bytes = field.bytes().await?;
        upload = Some((filename, bytes.to_vec()));
        break;
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("Missing file upload".to_string()))?;

    tracing::info!(filename = %filename, bytes = bytes.len(), "Report upload received");

    let analysis = pipeline.analyze_report(filename, bytes).await?;
    Ok(Json(analysis))
}

fn is_pdf_name(filename: &str) -> bool {
    filename.to_ascii_lowercase().ends_with(".pdf")
}
