//! Prompt templates for each kind of input

use crate::analysis::{ChatMessage, SymptomInput};

/// Characters of report text embedded in a report prompt.
pub const REPORT_TEXT_LIMIT: usize = 4000;

/// Render a structured symptom submission into an analysis prompt
pub fn symptom_prompt(input: &SymptomInput) -> String {
    let history = input
        .medical_history
        .as_deref()
        .unwrap_or("None provided");

    format!(
        r#"Please analyze the following health symptoms and provide a structured assessment:

**Patient Information:**
- Age: {age} years old
- Gender: {gender}
- Medical History: {history}

**Symptoms:**
{symptoms}

**Duration:** {duration}
**Severity:** {severity}

Please provide:
1. A preliminary assessment of these symptoms
2. Possible conditions that could cause these symptoms (with likelihood)
3. Recommended next steps
4. Urgency level (low/moderate/high/emergency)
5. Warning signs that would require immediate medical attention

Remember: This is for educational purposes only and not a medical diagnosis."#,
        age = input.age,
        gender = input.gender,
        symptoms = input.symptoms.join(", "),
        duration = input.duration,
        severity = input.severity,
    )
}

/// Render extracted report text into a summary prompt.
///
/// Only the first [`REPORT_TEXT_LIMIT`] characters of the report are embedded.
pub fn report_prompt(report_text: &str) -> String {
    let excerpt: String = report_text.chars().take(REPORT_TEXT_LIMIT).collect();

    format!(
        r#"Please analyze the following medical report and provide a patient-friendly summary:

**Medical Report Content:**
{excerpt}

Please provide:
1. A clear, easy-to-understand summary of the report findings
2. Key health indicators and what they mean
3. Any abnormal values and their significance
4. Recommended follow-up actions
5. Questions the patient might want to ask their doctor

Format the response in a way that's accessible to someone without medical training."#
    )
}

/// Render a chat message and its optional prior context
pub fn chat_prompt(chat: &ChatMessage) -> String {
    let context = chat.context.as_deref().unwrap_or("None");

    format!(
        r#"User health question: {message}

Previous context: {context}

Please provide helpful, accurate health information while:
1. Being empathetic and supportive
2. Providing evidence-based information
3. Recommending professional consultation when appropriate
4. Avoiding definitive diagnoses"#,
        message = chat.message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> SymptomInput {
        SymptomInput {
            symptoms: vec!["headache".to_string(), "fever".to_string()],
            duration: "2 days".to_string(),
            severity: "moderate".to_string(),
            age: 30,
            gender: "female".to_string(),
            medical_history: Some("asthma".to_string()),
        }
    }

    #[test]
    fn symptom_prompt_embeds_every_field() {
        let prompt = symptom_prompt(&sample_input());
        assert!(prompt.contains("Age: 30 years old"));
        assert!(prompt.contains("Gender: female"));
        assert!(prompt.contains("Medical History: asthma"));
        assert!(prompt.contains("headache, fever"));
        assert!(prompt.contains("**Duration:** 2 days"));
        assert!(prompt.contains("**Severity:** moderate"));
        assert!(prompt.contains("Urgency level (low/moderate/high/emergency)"));
    }

    #[test]
    fn symptom_prompt_without_history() {
        let mut input = sample_input();
        input.medical_history = None;
        assert!(symptom_prompt(&input).contains("Medical History: None provided"));
    }

    #[test]
    fn symptom_prompt_is_deterministic() {
        let input = sample_input();
        assert_eq!(symptom_prompt(&input), symptom_prompt(&input));
    }

    #[test]
    fn report_prompt_truncates_long_text() {
        let text = format!("{}{}", "a".repeat(REPORT_TEXT_LIMIT), "TAIL");
        let prompt = report_prompt(&text);
        assert!(prompt.contains(&"a".repeat(REPORT_TEXT_LIMIT)));
        assert!(!prompt.contains("TAIL"));
    }

    #[test]
    fn report_prompt_counts_characters_not_bytes() {
        // Multi-byte characters must not be split
        let text = "é".repeat(REPORT_TEXT_LIMIT + 10);
        let prompt = report_prompt(&text);
        assert_eq!(prompt.matches('é').count(), REPORT_TEXT_LIMIT);
    }

    #[test]
    fn report_prompt_keeps_short_text_whole() {
        let prompt = report_prompt("Hemoglobin 13.5 g/dL");
        assert!(prompt.contains("Hemoglobin 13.5 g/dL"));
    }

    #[test]
    fn chat_prompt_with_and_without_context() {
        let with = chat_prompt(&ChatMessage {
            message: "Is ibuprofen safe?".to_string(),
            context: Some("I have a headache".to_string()),
        });
        assert!(with.contains("User health question: Is ibuprofen safe?"));
        assert!(with.contains("Previous context: I have a headache"));

        let without = chat_prompt(&ChatMessage {
            message: "Is ibuprofen safe?".to_string(),
            context: None,
        });
        assert!(without.contains("Previous context: None"));
    }
}
