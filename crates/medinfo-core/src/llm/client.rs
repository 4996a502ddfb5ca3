//! HTTP client for OpenAI-compatible LLM completion services (Groq, vLLM, etc.)

use crate::config::LLMServiceConfig;
use crate::error::{MedInfoError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Trait for LLM completion clients
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Free-form chat completion
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String>;

    /// Completion constrained to the provider's strict JSON mode
    async fn json_completion(&self, messages: Vec<ChatMessage>) -> Result<String>;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Chat message for completion requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Groq/OpenAI-compatible completion client
pub struct GroqClient {
    http_client: reqwest::Client,
    config: LLMServiceConfig,
}

impl GroqClient {
    /// Create a new client from configuration
    pub fn new(config: LLMServiceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(MedInfoError::Http)?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(LLMServiceConfig::default())
    }

    async fn complete(&self, messages: Vec<ChatMessage>, json_mode: bool) -> Result<String> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            MedInfoError::Config("LLM API credentials are not configured".to_string())
        })?;

        #[derive(Serialize)]
        struct ResponseFormat {
            #[serde(rename = "type")]
            kind: &'static str,
        }

        #[derive(Serialize)]
        struct ChatRequest {
            model: String,
            messages: Vec<ChatMessage>,
            #[serde(skip_serializing_if = "Option::is_none")]
            response_format: Option<ResponseFormat>,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<ChatChoice>,
        }

        #[derive(Deserialize)]
        struct ChatChoice {
            message: ChatMessage,
        }

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages,
            response_format: json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let url = format!("{}/v1/chat/completions", self.config.url);

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await
            .map_err(MedInfoError::Http)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MedInfoError::Provider(format!(
                "LLM service error (HTTP {}): {}",
                status.as_u16(),
                body
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(MedInfoError::Http)?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| MedInfoError::Synthesis("no completion returned by the LLM".to_string()))
    }
}

#[async_trait]
impl LLMClient for GroqClient {
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
        self.complete(messages, false).await
    }

    async fn json_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
        self.complete(messages, true).await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
