use std::sync::Arc;

use crate::config::Config;
use crate::translate::{TranslateFactory, TranslateInterface};
use crate::tts::{TTSFactory, TTSInterface};

/// Shared, read-only application state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub translator: Arc<dyn TranslateInterface>,
    pub tts: Arc<dyn TTSInterface>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let translator = TranslateFactory::create_translator(&config.translation)?;
        let tts = TTSFactory::create_tts(&config.speech)?;
        Ok(Self::with_services(config, translator, tts))
    }

    pub fn with_services(
        config: Config,
        translator: Arc<dyn TranslateInterface>,
        tts: Arc<dyn TTSInterface>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            translator,
            tts,
        }
    }
}
