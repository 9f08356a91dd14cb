use thiserror::Error;
use uuid::Uuid;

/// Failures the analysis pipeline reports to its caller.
///
/// Gateway and normalization problems never show up here: both degrade into
/// a valid (if low-confidence) result instead.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Error reading PDF: {0}")]
    DocumentDecode(String),

    #[error("Could not extract text from PDF")]
    EmptyDocument,

    #[error("Analysis not found: {0}")]
    NotFound(Uuid),
}
