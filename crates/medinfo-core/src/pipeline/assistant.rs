//! Conversational medical assistant
//!
//! Free-form markdown chat. The disclaimer is a prompt contract, not
//! enforced in code.

use crate::error::Result;
use crate::llm::{ChatMessage, LLMClient};
use std::sync::Arc;

const ASSISTANT_SYSTEM_PROMPT: &str = r#"You are a knowledgeable and empathetic AI medical assistant. Provide clear, accurate, well-structured information about health and medication questions.

Instructions:
1. Structure responses with Markdown: headings, bullet points, bold text.
2. Keep a professional, caring tone.
3. Be thorough: for a medication question cover uses, common side effects and important warnings; for a general health question give actionable advice.
4. ALWAYS end your response with the following disclaimer, formatted exactly as below:

---

***Disclaimer:** This information is for educational purposes only and is not a substitute for professional medical advice. Always consult with a qualified healthcare provider for any health concerns or before making any decisions related to your health or treatment.*"#;

/// Answers free-form user messages through the completion client
pub struct Assistant {
    client: Arc<dyn LLMClient>,
}

impl Assistant {
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self { client }
    }

    /// Answer one user message in markdown
    pub async fn reply(&self, message: &str) -> Result<String> {
        let messages = vec![
            ChatMessage::system(ASSISTANT_SYSTEM_PROMPT),
            ChatMessage::user(message),
        ];
        let reply = self.client.chat_completion(messages).await?;
        Ok(reply.trim().to_string())
    }
}
