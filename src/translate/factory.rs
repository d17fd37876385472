use std::sync::Arc;
use std::time::Duration;
use anyhow::Result;
use reqwest::Client;
use tracing::{info, warn};

use crate::config::TranslationConfig;
use super::gemini::GeminiTranslator;
use super::interface::TranslateInterface;

/// Factory for creating translators
pub struct TranslateFactory;

impl TranslateFactory {
    /// Create a translator from the `translation` config section
    ///
    /// A missing API key is not fatal here: the server still starts and
    /// `/api/translate` answers with a configuration error.
    pub fn create_translator(config: &TranslationConfig) -> Result<Arc<dyn TranslateInterface>> {
        info!("Initializing translator: model={}", config.model);

        if config.usable_api_key().is_none() {
            warn!("Gemini API key is not set; translation requests will fail until GEMINI_API_KEY is provided");
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Arc::new(GeminiTranslator::new(client, config.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_unconfigured_translator_without_key() {
        let translator = TranslateFactory::create_translator(&TranslationConfig::default()).unwrap();
        assert!(!translator.is_configured());
    }

    #[test]
    fn builds_configured_translator_with_key() {
        let config = TranslationConfig {
            api_key: Some("abc".to_string()),
            ..TranslationConfig::default()
        };
        let translator = TranslateFactory::create_translator(&config).unwrap();
        assert!(translator.is_configured());
    }
}
