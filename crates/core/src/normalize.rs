//! Model reply normalization
//!
//! Turns whatever text came back from the model gateway into the canonical
//! analysis fields. Never fails: text that does not hold a JSON object yields
//! a degraded reply carrying the raw text as its assessment.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value as JsonValue};

use crate::analysis::PossibleCondition;

const DEFAULT_ASSESSMENT: &str = "Analysis complete";
const DEFAULT_URGENCY: &str = "moderate";
const DEGRADED_RECOMMENDATION: &str =
    "Please consult a healthcare professional for accurate diagnosis";

/// Canonical analysis fields extracted from a model reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedReply {
    pub preliminary_assessment: String,
    pub possible_conditions: Vec<PossibleCondition>,
    pub recommendations: Vec<String>,
    pub urgency_level: String,
    /// Set when the reply held no parseable JSON object.
    pub degraded: bool,
}

impl NormalizedReply {
    fn degraded(raw: &str) -> Self {
        Self {
            preliminary_assessment: raw.to_string(),
            possible_conditions: Vec::new(),
            recommendations: vec![DEGRADED_RECOMMENDATION.to_string()],
            urgency_level: DEFAULT_URGENCY.to_string(),
            degraded: true,
        }
    }
}

/// Expected reply schema. Every field has a default and wrong-typed values
/// fall back to it instead of failing the parse.
#[derive(Debug, Deserialize)]
struct ModelReply {
    #[serde(default = "default_assessment", deserialize_with = "assessment")]
    preliminary_assessment: String,
    #[serde(default, deserialize_with = "conditions")]
    possible_conditions: Vec<PossibleCondition>,
    #[serde(default, deserialize_with = "string_list")]
    recommendations: Vec<String>,
    #[serde(default = "default_urgency", deserialize_with = "urgency")]
    urgency_level: String,
}

fn default_assessment() -> String {
    DEFAULT_ASSESSMENT.to_string()
}

fn default_urgency() -> String {
    DEFAULT_URGENCY.to_string()
}

fn assessment<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = JsonValue::deserialize(d)?;
    Ok(value
        .as_str()
        .map_or_else(default_assessment, str::to_string))
}

fn urgency<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = JsonValue::deserialize(d)?;
    Ok(value.as_str().map_or_else(default_urgency, str::to_string))
}

fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let value = JsonValue::deserialize(d)?;
    let items = match value {
        JsonValue::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            JsonValue::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

fn conditions<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<PossibleCondition>, D::Error> {
    let value = JsonValue::deserialize(d)?;
    let items = match value {
        JsonValue::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .iter()
        .filter_map(JsonValue::as_object)
        .map(|obj| PossibleCondition {
            name: field_text(obj, "name"),
            likelihood: field_text(obj, "likelihood"),
            description: field_text(obj, "description"),
        })
        .collect())
}

/// Strings as-is, other scalars as their JSON text, missing or null as ""
fn field_text(obj: &Map<String, JsonValue>, key: &str) -> String {
    match obj.get(key) {
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Extract the payload of the first fenced block, preferring a ```json fence.
///
/// An unclosed fence yields everything after it. Text with no fence is
/// returned unchanged.
pub fn extract_json_block(text: &str) -> &str {
    for fence in ["```json", "```"] {
        if let Some(start) = text.find(fence) {
            let after = &text[start + fence.len()..];
            return after.find("```").map_or(after, |end| &after[..end]);
        }
    }
    text
}

/// Normalize raw gateway text into the canonical analysis fields
pub fn normalize(raw: &str) -> NormalizedReply {
    let candidate = extract_json_block(raw);

    let value = match serde_json::from_str::<JsonValue>(candidate) {
        Ok(value @ JsonValue::Object(_)) => value,
        _ => return NormalizedReply::degraded(raw),
    };

    match serde_json::from_value::<ModelReply>(value) {
        Ok(reply) => NormalizedReply {
            preliminary_assessment: reply.preliminary_assessment,
            possible_conditions: reply.possible_conditions,
            recommendations: reply.recommendations,
            urgency_level: reply.urgency_level,
            degraded: false,
        },
        Err(_) => NormalizedReply::degraded(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::FALLBACK_PAYLOAD;

    const MODEL_JSON: &str = r#"{
        "preliminary_assessment": "Likely a viral infection.",
        "possible_conditions": [
            {"name": "Influenza", "likelihood": "high", "description": "Seasonal flu"},
            {"name": "Common cold", "likelihood": "moderate", "description": "Upper respiratory infection"}
        ],
        "recommendations": ["Rest", "Fluids"],
        "urgency_level": "low",
        "when_to_seek_help": "If breathing becomes difficult"
    }"#;

    #[test]
    fn fallback_payload_parses_cleanly() {
        let reply = normalize(FALLBACK_PAYLOAD);
        assert!(!reply.degraded);
        assert_eq!(reply.urgency_level, "moderate");
        assert_eq!(reply.possible_conditions.len(), 1);
        assert_eq!(reply.recommendations.len(), 4);
        assert_eq!(
            reply.possible_conditions[0].name,
            "General Health Consultation Needed"
        );
    }

    #[test]
    fn plain_json_keeps_model_order() {
        let reply = normalize(MODEL_JSON);
        assert_eq!(reply.preliminary_assessment, "Likely a viral infection.");
        let names: Vec<_> = reply
            .possible_conditions
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Influenza", "Common cold"]);
        assert_eq!(reply.recommendations, vec!["Rest", "Fluids"]);
        assert_eq!(reply.urgency_level, "low");
    }

    #[test]
    fn json_fence_matches_unwrapped() {
        let fenced = format!("Here is my assessment:\n```json\n{MODEL_JSON}\n```\nTake care.");
        assert_eq!(normalize(&fenced), normalize(MODEL_JSON));
    }

    #[test]
    fn generic_fence_matches_unwrapped() {
        let fenced = format!("```\n{MODEL_JSON}\n```");
        assert_eq!(normalize(&fenced), normalize(MODEL_JSON));
    }

    #[test]
    fn json_fence_preferred_over_earlier_generic_fence() {
        let text = format!("```\nnot json\n```\n```json\n{MODEL_JSON}\n```");
        assert!(!normalize(&text).degraded);
    }

    #[test]
    fn unclosed_fence_takes_the_rest() {
        let text = format!("```json\n{MODEL_JSON}");
        assert_eq!(normalize(&text), normalize(MODEL_JSON));
    }

    #[test]
    fn extract_without_fence_is_identity() {
        assert_eq!(extract_json_block("{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let reply = normalize("{}");
        assert!(!reply.degraded);
        assert_eq!(reply.preliminary_assessment, "Analysis complete");
        assert!(reply.possible_conditions.is_empty());
        assert!(reply.recommendations.is_empty());
        assert_eq!(reply.urgency_level, "moderate");
    }

    #[test]
    fn urgency_passes_through_unvalidated() {
        let reply = normalize(r#"{"urgency_level": "whenever"}"#);
        assert_eq!(reply.urgency_level, "whenever");
    }

    #[test]
    fn free_text_degrades_to_raw_assessment() {
        let raw = "I think you should see a doctor soon.";
        let reply = normalize(raw);
        assert!(reply.degraded);
        assert_eq!(reply.preliminary_assessment, raw);
        assert!(reply.possible_conditions.is_empty());
        assert_eq!(reply.recommendations, vec![DEGRADED_RECOMMENDATION]);
        assert_eq!(reply.urgency_level, "moderate");
    }

    #[test]
    fn degraded_path_is_idempotent() {
        let raw = "```json\n{ this is not json }\n```";
        let first = normalize(raw);
        let second = normalize(raw);
        assert_eq!(first, second);
        assert_eq!(first.preliminary_assessment, raw);
    }

    #[test]
    fn non_object_json_degrades() {
        assert!(normalize("[1, 2, 3]").degraded);
        assert!(normalize("\"just a string\"").degraded);
        assert!(normalize("null").degraded);
    }

    #[test]
    fn wrong_typed_fields_fall_back_to_defaults() {
        let reply = normalize(
            r#"{
                "preliminary_assessment": 42,
                "possible_conditions": "none",
                "recommendations": ["Rest", 7, null, "Hydrate"],
                "urgency_level": null
            }"#,
        );
        assert!(!reply.degraded);
        assert_eq!(reply.preliminary_assessment, "Analysis complete");
        assert!(reply.possible_conditions.is_empty());
        assert_eq!(reply.recommendations, vec!["Rest", "Hydrate"]);
        assert_eq!(reply.urgency_level, "moderate");
    }

    #[test]
    fn condition_fields_are_lenient() {
        let reply = normalize(
            r#"{"possible_conditions": [
                {"name": "Migraine", "likelihood": 0.7},
                "not an object",
                {"description": "Unnamed"}
            ]}"#,
        );
        assert_eq!(reply.possible_conditions.len(), 2);
        assert_eq!(reply.possible_conditions[0].likelihood, "0.7");
        assert_eq!(reply.possible_conditions[0].description, "");
        assert_eq!(reply.possible_conditions[1].name, "");
        assert_eq!(reply.possible_conditions[1].description, "Unnamed");
    }
}
