use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const AUDIO_MPEG: &str = "audio/mpeg";

/// Body of `POST /api/tts`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TTSRequest {
    pub text: String,
}

/// Synthesized audio, passed through from the upstream untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechAudio {
    pub data: Vec<u8>,
    pub content_type: &'static str,
}

#[derive(Debug, Error)]
pub enum TTSError {
    #[error("Text to speak must not be empty")]
    EmptyInput,

    #[error("Invalid TTS endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("TTS request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("TTS provider returned {0}")]
    UpstreamStatus(reqwest::StatusCode),
}

/// TTS interface trait
#[async_trait]
pub trait TTSInterface: Send + Sync {
    /// Synthesize `text` and return the raw audio
    ///
    /// # Arguments
    /// * `text` - The text to speak, in the configured language
    ///
    /// # Returns
    /// MP3 bytes with their content type
    async fn synthesize(&self, text: &str) -> Result<SpeechAudio, TTSError>;
}
