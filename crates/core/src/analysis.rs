//! Analysis request and result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AnalysisError;
use crate::normalize::NormalizedReply;

/// Disclaimer attached to every symptom analysis, whatever the model said.
pub const DISCLAIMER: &str = "This analysis is for informational purposes only and does not constitute medical advice. Always consult a qualified healthcare provider for proper diagnosis and treatment.";

/// Disclaimer attached to medical report summaries.
pub const REPORT_DISCLAIMER: &str = "This analysis is for informational purposes only. Please discuss these results with your healthcare provider.";

/// Highest accepted patient age.
pub const MAX_AGE: u32 = 150;

/// Structured symptom submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymptomInput {
    pub symptoms: Vec<String>,
    pub duration: String,
    /// Expected to be mild, moderate or severe; passed through as given.
    pub severity: String,
    pub age: u32,
    pub gender: String,
    #[serde(default)]
    pub medical_history: Option<String>,
}

impl SymptomInput {
    /// Check the constraints the routing layer enforces before the pipeline runs.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.symptoms.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "symptoms must contain at least one entry".to_string(),
            ));
        }
        if self.age > MAX_AGE {
            return Err(AnalysisError::InvalidInput(format!(
                "age must be between 0 and {MAX_AGE}"
            )));
        }
        Ok(())
    }
}

/// Free-text health question
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub message: String,
    #[serde(default)]
    pub context: Option<String>,
}

impl ChatMessage {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.message.trim().is_empty() {
            return Err(AnalysisError::InvalidInput(
                "message must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// One candidate condition, in the order the model listed it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PossibleCondition {
    pub name: String,
    pub likelihood: String,
    pub description: String,
}

/// A completed symptom analysis. Never mutated once built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisResult {
    pub analysis_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub symptoms: Vec<String>,
    pub preliminary_assessment: String,
    pub possible_conditions: Vec<PossibleCondition>,
    pub recommendations: Vec<String>,
    pub urgency_level: String,
    pub disclaimer: String,
}

impl AnalysisResult {
    /// Assemble a result from a normalized model reply.
    ///
    /// The disclaimer is always the fixed constant.
    pub fn new(
        analysis_id: Uuid,
        timestamp: DateTime<Utc>,
        symptoms: Vec<String>,
        reply: NormalizedReply,
    ) -> Self {
        Self {
            analysis_id,
            timestamp,
            symptoms,
            preliminary_assessment: reply.preliminary_assessment,
            possible_conditions: reply.possible_conditions,
            recommendations: reply.recommendations,
            urgency_level: reply.urgency_level,
            disclaimer: DISCLAIMER.to_string(),
        }
    }
}

/// Summary of an uploaded medical report. The model text is returned as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentAnalysis {
    pub analysis_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub filename: String,
    pub analysis: String,
    pub disclaimer: String,
}

/// Reply to a chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatReply {
    pub response: String,
    pub timestamp: DateTime<Utc>,
}
