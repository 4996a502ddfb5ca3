//! Conversational assistant endpoint

use crate::error::ApiError;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use medinfo_core::{Assistant, MedInfoError};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// `POST /ai-assistant {message}` — free-form markdown reply
pub async fn ai_assistant(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(MedInfoError::InvalidInput("please enter a message".to_string()).into());
    }

    let assistant = Assistant::new(Arc::clone(&state.llm));
    let reply = assistant.reply(message).await?;

    Ok(Json(json!({ "reply": reply })))
}
