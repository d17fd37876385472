use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::interface::{TranslateError, TranslateInterface};
use crate::config::TranslationConfig;

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Darija translator backed by the Gemini `generateContent` endpoint
pub struct GeminiTranslator {
    client: Client,
    config: TranslationConfig,
}

impl GeminiTranslator {
    pub fn new(client: Client, config: TranslationConfig) -> Self {
        info!(
            "Initialized GeminiTranslator: model={}, base_url={}",
            config.model, config.base_url
        );
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn extract_text(body: &str) -> Result<String, TranslateError> {
        let parsed: GenerateContentResponse = serde_json::from_str(body)
            .map_err(|e| TranslateError::MalformedResponse(e.to_string()))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or(TranslateError::NoCandidates)
    }
}

#[async_trait]
impl TranslateInterface for GeminiTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        if text.trim().is_empty() {
            return Err(TranslateError::EmptyInput);
        }
        let api_key = self
            .config
            .usable_api_key()
            .ok_or(TranslateError::MissingApiKey)?;

        let prompt = format!("{}{}", self.config.prompt, text);
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
        };

        debug!("Sending translation request: {} chars", text.chars().count());

        // .json() sets Content-Type: application/json
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                // The URL carries the API key
                let e = e.without_url();
                error!("Translation request failed: {}", e);
                TranslateError::Request(e)
            })?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| TranslateError::Request(e.without_url()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            error!("Gemini returned {}: {}", status, message);
            return Err(TranslateError::UpstreamStatus { status, message });
        }

        let translation = Self::extract_text(&raw)?;
        debug!("Translation successful: {} chars", translation.chars().count());
        Ok(translation)
    }

    fn is_configured(&self) -> bool {
        self.config.usable_api_key().is_some()
    }
}
