//! Canned reply used when the completion service cannot be used

/// Pre-encoded model reply, in the same shape the normalizer expects from the
/// live model.
pub const FALLBACK_PAYLOAD: &str = r#"{"preliminary_assessment": "Based on the symptoms provided, I can offer some general health information. However, for accurate diagnosis, please consult a healthcare professional.", "possible_conditions": [{"name": "General Health Consultation Needed", "likelihood": "N/A", "description": "Your symptoms require professional medical evaluation for accurate diagnosis."}], "recommendations": ["Schedule an appointment with your primary care physician", "Keep track of your symptoms, noting any changes in severity or new symptoms", "Stay hydrated and get adequate rest", "Avoid self-medication without professional guidance"], "urgency_level": "moderate", "when_to_seek_help": "Seek immediate medical attention if you experience: difficulty breathing, chest pain, sudden severe headache, high fever, or any symptoms that are rapidly worsening."}"#;
