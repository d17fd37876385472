use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Url};
use tracing::{debug, error, info};

use super::interface::{SpeechAudio, TTSError, TTSInterface, AUDIO_MPEG};
use crate::config::SpeechConfig;

/// TTS client for the public Google Translate speech endpoint
pub struct GoogleTTSClient {
    client: Client,
    config: SpeechConfig,
}

impl GoogleTTSClient {
    pub fn new(client: Client, config: SpeechConfig) -> Self {
        info!(
            "Initialized GoogleTTSClient: endpoint={}, language={}",
            config.endpoint, config.language
        );
        Self { client, config }
    }

    /// Build the upstream URL with `text` percent-encoded into `q`
    pub fn build_url(&self, text: &str) -> Result<Url, TTSError> {
        Url::parse_with_params(
            &self.config.endpoint,
            &[
                ("ie", "UTF-8"),
                ("client", self.config.client.as_str()),
                ("tl", self.config.language.as_str()),
                ("q", text),
            ],
        )
        .map_err(|e| TTSError::InvalidEndpoint(e.to_string()))
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[async_trait]
impl TTSInterface for GoogleTTSClient {
    async fn synthesize(&self, text: &str) -> Result<SpeechAudio, TTSError> {
        if text.trim().is_empty() {
            return Err(TTSError::EmptyInput);
        }

        // Consoles tend to mangle Arabic, so log the bytes
        debug!("Received TTS text (hex): {}", to_hex(text.as_bytes()));

        let url = self.build_url(text)?;
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.config.user_agent)
            .send()
            .await
            .map_err(|e| {
                error!("TTS request failed: {}", e);
                TTSError::Request(e)
            })?;

        let status = response.status();
        let upstream_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("<none>")
            .to_string();

        if !status.is_success() {
            error!("TTS provider returned {} ({})", status, upstream_type);
            return Err(TTSError::UpstreamStatus(status));
        }

        let data = response.bytes().await?.to_vec();
        info!(
            "TTS response: status={}, content_type={}, size={}",
            status,
            upstream_type,
            data.len()
        );

        Ok(SpeechAudio {
            data,
            content_type: AUDIO_MPEG,
        })
    }
}
