//! Analysis pipeline: prompt → model gateway → normalizer → store
//!
//! One `AnalysisPipeline` is built at startup and handed to every request
//! handler; it owns the gateway and the analysis store.

use chrono::Utc;
use symptom_core::{
    AnalysisError, AnalysisResult, ChatMessage, ChatReply, DocumentAnalysis, REPORT_DISCLAIMER,
    SymptomInput, normalize, prompt,
};
use uuid::Uuid;

use crate::ai::ModelGateway;
use crate::document;
use crate::store::AnalysisStore;

#[derive(Clone)]
pub struct AnalysisPipeline {
    gateway: ModelGateway,
    store: AnalysisStore,
}

impl AnalysisPipeline {
    pub fn new(gateway: ModelGateway, store: AnalysisStore) -> Self {
        Self { gateway, store }
    }

    pub fn gateway(&self) -> &ModelGateway {
        &self.gateway
    }

    /// Analyze structured symptoms and store the result
    pub async fn analyze_symptoms(&self, input: SymptomInput) -> AnalysisResult {
        let analysis_id = Uuid::new_v4();
        let prompt = prompt::symptom_prompt(&input);

        let raw = self.gateway.invoke(&prompt).await;
        let reply = normalize(&raw);
        if reply.degraded {
            tracing::warn!(
                analysis_id = %analysis_id,
                "Model reply was not valid JSON, returning degraded analysis"
            );
        }

        let result = AnalysisResult::new(analysis_id, Utc::now(), input.symptoms, reply);
        self.store.put(result.clone()).await;

        tracing::info!(
            analysis_id = %analysis_id,
            urgency = %result.urgency_level,
            conditions = result.possible_conditions.len(),
            "Symptom analysis stored"
        );
        metrics::counter!("analyses_total", "kind" => "symptoms").increment(1);

        result
    }

    /// Summarize an uploaded PDF report. The caller has already checked the
    /// filename; the report text must be non-empty.
    pub async fn analyze_report(
        &self,
        filename: String,
        pdf_bytes: Vec<u8>,
    ) -> Result<DocumentAnalysis, AnalysisError> {
        let size = pdf_bytes.len();
        let text = document::extract_text_blocking(pdf_bytes).await?;
        if text.is_empty() {
            tracing::warn!(filename = %filename, bytes = size, "No extractable text in report");
            return Err(AnalysisError::EmptyDocument);
        }

        let analysis_id = Uuid::new_v4();
        tracing::info!(
            analysis_id = %analysis_id,
            filename = %filename,
            chars = text.chars().count(),
            "Analyzing medical report"
        );

        let analysis = self.gateway.invoke(&prompt::report_prompt(&text)).await;
        metrics::counter!("analyses_total", "kind" => "report").increment(1);

        Ok(DocumentAnalysis {
            analysis_id,
            timestamp: Utc::now(),
            filename,
            analysis,
            disclaimer: REPORT_DISCLAIMER.to_string(),
        })
    }

    pub async fn chat(&self, message: ChatMessage) -> ChatReply {
        let response = self.gateway.invoke(&prompt::chat_prompt(&message)).await;
        metrics::counter!("analyses_total", "kind" => "chat").increment(1);

        ChatReply {
            response,
            timestamp: Utc::now(),
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<AnalysisResult, AnalysisError> {
        self.store.get(id).await
    }

    pub async fn list(&self) -> Vec<AnalysisResult> {
        self.store.list_all().await
    }

    pub async fn stored_count(&self) -> usize {
        self.store.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::tests::make_test_pdf;
    use symptom_core::{DISCLAIMER, FALLBACK_PAYLOAD};

    fn offline() -> AnalysisPipeline {
        AnalysisPipeline::new(ModelGateway::Fallback, AnalysisStore::new())
    }

    fn sample_input() -> SymptomInput {
        SymptomInput {
            symptoms: vec!["headache".to_string(), "fever".to_string()],
            duration: "2 days".to_string(),
            severity: "moderate".to_string(),
            age: 30,
            gender: "female".to_string(),
            medical_history: None,
        }
    }

    #[tokio::test]
    async fn offline_symptom_analysis_uses_fallback_shape() {
        let pipeline = offline();
        let result = pipeline.analyze_symptoms(sample_input()).await;

        assert_eq!(result.symptoms, vec!["headache", "fever"]);
        assert_eq!(result.urgency_level, "moderate");
        assert_eq!(result.recommendations.len(), 4);
        assert_eq!(result.possible_conditions.len(), 1);
        assert_eq!(result.disclaimer, DISCLAIMER);
    }

    #[tokio::test]
    async fn symptom_analysis_is_stored_and_retrievable() {
        let pipeline = offline();
        let first = pipeline.analyze_symptoms(sample_input()).await;
        let second = pipeline.analyze_symptoms(sample_input()).await;

        assert_ne!(first.analysis_id, second.analysis_id);
        assert_eq!(pipeline.get(first.analysis_id).await.unwrap(), first);
        assert_eq!(pipeline.stored_count().await, 2);
        assert_eq!(pipeline.list().await, vec![first, second]);
    }

    #[tokio::test]
    async fn unknown_analysis_is_not_found() {
        let pipeline = offline();
        assert!(matches!(
            pipeline.get(Uuid::new_v4()).await,
            Err(AnalysisError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn report_returns_raw_gateway_text() {
        let pipeline = offline();
        let pdf = make_test_pdf(&["Glucose elevated"]);
        let report = pipeline
            .analyze_report("labs.pdf".to_string(), pdf)
            .await
            .unwrap();

        assert_eq!(report.filename, "labs.pdf");
        assert_eq!(report.analysis, FALLBACK_PAYLOAD);
        assert_eq!(report.disclaimer, REPORT_DISCLAIMER);
        // Reports are not kept in the analysis store
        assert!(pipeline.list().await.is_empty());
    }

    #[tokio::test]
    async fn blank_report_is_rejected() {
        let pipeline = offline();
        let pdf = make_test_pdf(&[""]);
        let result = pipeline.analyze_report("blank.pdf".to_string(), pdf).await;
        assert!(matches!(result, Err(AnalysisError::EmptyDocument)));
    }

    #[tokio::test]
    async fn corrupt_report_is_a_decode_error() {
        let pipeline = offline();
        let result = pipeline
            .analyze_report("broken.pdf".to_string(), b"%PDF-1.4 garbage".to_vec())
            .await;
        assert!(matches!(result, Err(AnalysisError::DocumentDecode(_))));
    }

    #[tokio::test]
    async fn chat_returns_gateway_text() {
        let pipeline = offline();
        let reply = pipeline
            .chat(ChatMessage {
                message: "Should I worry about a mild cough?".to_string(),
                context: None,
            })
            .await;
        assert_eq!(reply.response, FALLBACK_PAYLOAD);
    }
}
