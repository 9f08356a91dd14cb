//! PDF text extraction for uploaded medical reports

use symptom_core::AnalysisError;

/// Extract the text of every page, joined by newlines and trimmed.
///
/// Returns an empty string when no page has text; the caller decides what
/// that means.
pub fn extract_text(pdf_bytes: &[u8]) -> Result<String, AnalysisError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        .map_err(|e| AnalysisError::DocumentDecode(e.to_string()))?;

    Ok(pages.join("\n").trim().to_string())
}

/// Run [`extract_text`] on the blocking pool.
///
/// The decoder is CPU-bound and can panic on hostile input; a panic is
/// reported as a decode error.
pub async fn extract_text_blocking(pdf_bytes: Vec<u8>) -> Result<String, AnalysisError> {
    tokio::task::spawn_blocking(move || extract_text(&pdf_bytes))
        .await
        .map_err(|e| AnalysisError::DocumentDecode(format!("decoder aborted: {e}")))?
}
