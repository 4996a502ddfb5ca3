//! LLM integration
//!
//! Provides the completion client trait, the OpenAI-compatible HTTP
//! implementation, and the JSON synthesizer the pipelines build on.

mod client;
mod synthesizer;

pub use client::{ChatMessage, GroqClient, LLMClient};
pub use synthesizer::Synthesizer;
