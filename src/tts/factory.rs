use std::sync::Arc;
use std::time::Duration;
use anyhow::Result;
use reqwest::Client;
use tracing::info;

use crate::config::SpeechConfig;
use super::client::GoogleTTSClient;
use super::interface::TTSInterface;

/// Factory for creating TTS clients
pub struct TTSFactory;

impl TTSFactory {
    /// Create a TTS client from the `speech` config section
    pub fn create_tts(config: &SpeechConfig) -> Result<Arc<dyn TTSInterface>> {
        info!("Initializing TTS engine: language={}", config.language);

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Arc::new(GoogleTTSClient::new(client, config.clone())))
    }
}
