//! JSON synthesis over an LLM completion client
//!
//! The failure-containment boundary for AI calls: any provider hiccup —
//! network, HTTP, malformed reply — surfaces as the `Synthesis` error
//! variant. Missing credentials keep their `Config` identity so the API
//! layer can report "not configured" instead of a generic AI failure.

use super::{ChatMessage, LLMClient};
use crate::error::{MedInfoError, Result};
use std::sync::Arc;

/// Requests strict-JSON completions and parses them into JSON objects
pub struct Synthesizer {
    client: Arc<dyn LLMClient>,
}

impl Synthesizer {
    /// Create from an LLM client
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self { client }
    }

    /// Run one synthesis call and parse the reply as a JSON object
    pub async fn synthesize(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<serde_json::Value> {
        let messages = vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_prompt),
        ];

        let response = match self.client.json_completion(messages).await {
            Ok(text) => text,
            Err(err @ MedInfoError::Config(_)) => return Err(err),
            Err(err) => return Err(MedInfoError::Synthesis(err.to_string())),
        };

        parse_json_object(&response)
    }
}

/// Extract the JSON object from a completion, tolerating markdown fences
/// and stray prose around it
fn parse_json_object(response: &str) -> Result<serde_json::Value> {
    let json_str = match (response.find('{'), response.rfind('}')) {
        (Some(start), Some(end)) if start < end => &response[start..=end],
        _ => {
            return Err(MedInfoError::Synthesis(
                "the completion did not contain a JSON object".to_string(),
            ))
        }
    };

    let value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| MedInfoError::Synthesis(format!("the completion was not valid JSON: {}", e)))?;

    if !value.is_object() {
        return Err(MedInfoError::Synthesis(
            "the completion JSON was not an object".to_string(),
        ));
    }

    Ok(value)
}
