use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of `POST /api/translate`
#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translation: String,
}

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Text to translate must not be empty")]
    EmptyInput,

    #[error("Configuration Error: Gemini API Key is not set. Please export GEMINI_API_KEY or update the configuration file.")]
    MissingApiKey,

    #[error("Error during translation: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Error during translation: provider returned {status}: {message}")]
    UpstreamStatus {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Error during translation: unexpected response shape: {0}")]
    MalformedResponse(String),

    #[error("Error during translation: provider returned no candidates")]
    NoCandidates,
}

impl TranslateError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TranslateError::Request(e) if e.is_timeout())
    }
}

/// Translate interface trait
#[async_trait]
pub trait TranslateInterface: Send + Sync {
    /// Translate English `text` into Darija
    async fn translate(&self, text: &str) -> Result<String, TranslateError>;

    /// Whether a usable credential is configured
    fn is_configured(&self) -> bool;
}
