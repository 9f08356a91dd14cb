//! Model gateway: live completion calls with a canned fallback
//!
//! The gateway has two states. `Live` holds a configured client and tries a
//! single completion per call; `Fallback` never touches the network. Either
//! way `invoke` always yields text for the normalizer.

use std::time::Instant;

use symptom_core::FALLBACK_PAYLOAD;

use super::client::CompletionClient;

const SYSTEM_PROMPT: &str = r#"You are a helpful medical AI assistant. You provide preliminary health information based on symptoms described.

IMPORTANT DISCLAIMERS:
- You are NOT a replacement for professional medical advice
- Always recommend consulting a healthcare provider for proper diagnosis
- In case of emergency symptoms, advise immediate medical attention
- Provide educational information only

Format your responses as structured JSON with the following fields:
- preliminary_assessment: A brief overview of the symptoms
- possible_conditions: An array of objects with {name, likelihood, description}
- recommendations: An array of actionable advice
- urgency_level: One of "low", "moderate", "high", "emergency"
- when_to_seek_help: Specific warning signs to watch for"#;

#[derive(Clone)]
pub enum ModelGateway {
    Live(CompletionClient),
    Fallback,
}

impl ModelGateway {
    /// Live when a credential is configured, fallback-only otherwise
    pub fn from_api_key(api_key: Option<String>) -> Self {
        match api_key {
            Some(key) if !key.trim().is_empty() => ModelGateway::Live(CompletionClient::new(key)),
            _ => ModelGateway::Fallback,
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            ModelGateway::Live(_) => "live",
            ModelGateway::Fallback => "fallback",
        }
    }

    /// Run the prompt through the model. Never fails; any problem with the
    /// live call is logged and replaced by the fallback payload.
    pub async fn invoke(&self, prompt: &str) -> String {
        let client = match self {
            ModelGateway::Live(client) => client,
            ModelGateway::Fallback => {
                record("fallback", "unconfigured");
                return FALLBACK_PAYLOAD.to_string();
            }
        };

        let start = Instant::now();
        match client.complete(SYSTEM_PROMPT, prompt).await {
            Ok(text) => {
                tracing::debug!(
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    chars = text.len(),
                    "Completion succeeded"
                );
                record("live", "success");
                text
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    kind = e.kind(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Completion failed, using fallback reply"
                );
                record("live", e.kind());
                FALLBACK_PAYLOAD.to_string()
            }
        }
    }
}

fn record(mode: &'static str, outcome: &'static str) {
    metrics::counter!(
        "model_gateway_invocations_total",
        "mode" => mode,
        "outcome" => outcome
    )
    .increment(1);
}
