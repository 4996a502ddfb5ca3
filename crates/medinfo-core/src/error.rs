//! Error types for medinfo

use thiserror::Error;

/// Result type alias using MedInfoError
pub type Result<T> = std::result::Result<T, MedInfoError>;

/// Error type alias for convenience
pub type Error = MedInfoError;

/// Main error type for medinfo
#[derive(Debug, Error)]
pub enum MedInfoError {
    #[error("Service not configured: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Search provider error: {0}")]
    Provider(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("AI synthesis error: {0}")]
    Synthesis(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl MedInfoError {
    /// HTTP status code this error maps to at the API boundary
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::NotFound(_) => 404,
            Self::Config(_) => 503,
            _ => 500,
        }
    }
}
