//! Configuration management

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Web search service configuration
    #[serde(default)]
    pub search: SearchServiceConfig,

    /// LLM service configuration
    #[serde(default)]
    pub llm: LLMServiceConfig,
}

/// Web search service configuration (programmable search engine)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchServiceConfig {
    /// Search API endpoint
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,

    /// Search API key; endpoints degrade to "not configured" without it
    #[serde(default)]
    pub api_key: Option<String>,

    /// Programmable search engine identifier
    #[serde(default)]
    pub engine_id: Option<String>,

    /// Request timeout in seconds for text searches
    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u64,

    /// Request timeout in seconds for image lookups
    #[serde(default = "default_image_timeout")]
    pub image_timeout_secs: u64,
}

impl SearchServiceConfig {
    /// Both credentials present
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.engine_id.is_some()
    }
}

impl Default for SearchServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_search_endpoint(),
            api_key: std::env::var("MEDINFO_SEARCH_API_KEY").ok(),
            engine_id: std::env::var("MEDINFO_SEARCH_ENGINE_ID").ok(),
            timeout_secs: default_search_timeout(),
            image_timeout_secs: default_image_timeout(),
        }
    }
}

/// LLM service configuration for external inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMServiceConfig {
    /// Base URL of the OpenAI-compatible completion service
    #[serde(default = "default_llm_url")]
    pub url: String,

    /// Model name for chat completions
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// API key; endpoints degrade to "not configured" without it
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

impl LLMServiceConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for LLMServiceConfig {
    fn default() -> Self {
        Self {
            url: std::env::var("MEDINFO_LLM_URL")
                .unwrap_or_else(|_| "https://api.groq.com/openai".to_string()),
            model: default_llm_model(),
            api_key: std::env::var("MEDINFO_LLM_API_KEY").ok(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

fn default_search_endpoint() -> String {
    std::env::var("MEDINFO_SEARCH_URL")
        .unwrap_or_else(|_| "https://www.googleapis.com/customsearch/v1".to_string())
}

fn default_llm_url() -> String {
    std::env::var("MEDINFO_LLM_URL").unwrap_or_else(|_| "https://api.groq.com/openai".to_string())
}

fn default_llm_model() -> String {
    std::env::var("MEDINFO_LLM_MODEL").unwrap_or_else(|_| "llama3-70b-8192".to_string())
}

fn default_search_timeout() -> u64 {
    15
}

fn default_image_timeout() -> u64 {
    5
}

fn default_llm_timeout() -> u64 {
    30
}

impl Config {
    /// Load config from the default path, falling back to env-driven defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load config from a specific YAML file; missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }
}
