use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

/// Marker left in shipped config files in place of a real key
pub const API_KEY_PLACEHOLDER: &str = "INSERT_YOUR_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub translation: TranslationConfig,
    pub speech: SpeechConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Settings for the Gemini `generateContent` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub prompt: String,
    pub request_timeout_ms: u64,
}

/// Settings for the Google Translate TTS endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub endpoint: String,
    pub language: String,
    pub client: String,
    pub user_agent: String,
    pub request_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash".to_string(),
            prompt: "Translate the following English text to Moroccan Arabic (Darija). Output ONLY the translation, no explanations: ".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://translate.google.com/translate_tts".to_string(),
            language: "ar".to_string(),
            client: "gtx".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
            request_timeout_ms: 15_000,
        }
    }
}

impl TranslationConfig {
    /// Returns the key only if it is set to something other than blank or the placeholder.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !key.contains(API_KEY_PLACEHOLDER))
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!("Configuration file not found: {}", path);
        }

        let bytes = fs::read(path).with_context(|| format!("reading {}", path))?;
        // Strips a UTF-8 BOM if the file was saved by a Windows editor
        let (content, _, _) = encoding_rs::UTF_8.decode(&bytes);
        let content = substitute_env_vars(&content, |name| std::env::var(name).ok());

        // Determine file type by extension
        let path_lower = path.to_lowercase();
        let config: Config = if path_lower.ends_with(".jsonld") || path_lower.ends_with(".json") {
            serde_json::from_str(&content).with_context(|| format!("parsing {}", path))?
        } else {
            serde_yaml::from_str(&content).with_context(|| format!("parsing {}", path))?
        };

        debug!("Parsed configuration from {}", path);
        Ok(config)
    }

    /// Environment variables win over whatever the file said.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.translation.api_key = Some(key);
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }
}

/// Replace `${VAR}` and `${VAR:default}` with values from `lookup`.
///
/// Unknown variables without a default are left untouched so the
/// placeholder check on the API key can still catch them.
pub fn substitute_env_vars(content: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let pattern = Regex::new(r"\$\{(\w+)(?::([^}]*))?\}").expect("static regex");
    pattern
        .replace_all(content, |caps: &regex::Captures| {
            let name = &caps[1];
            lookup(name)
                .or_else(|| caps.get(2).map(|d| d.as_str().to_string()))
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn lookup_from(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    fn write_temp(suffix: &str, content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn substitutes_known_variables() {
        let out = substitute_env_vars("key: ${MY_KEY}", lookup_from(&[("MY_KEY", "abc")]));
        assert_eq!(out, "key: abc");
    }

    #[test]
    fn falls_back_to_inline_default() {
        let out = substitute_env_vars("key: ${MISSING:INSERT_YOUR_API_KEY}", lookup_from(&[]));
        assert_eq!(out, "key: INSERT_YOUR_API_KEY");
    }

    #[test]
    fn leaves_unknown_variables_without_default() {
        let out = substitute_env_vars("key: ${MISSING}", lookup_from(&[]));
        assert_eq!(out, "key: ${MISSING}");
    }

    #[test]
    fn environment_beats_inline_default() {
        let out = substitute_env_vars("${A:x}-${B:y}", lookup_from(&[("B", "z")]));
        assert_eq!(out, "x-z");
    }

    #[test]
    fn placeholder_and_blank_keys_are_unusable() {
        let mut cfg = TranslationConfig::default();
        assert_eq!(cfg.usable_api_key(), None);

        cfg.api_key = Some("   ".to_string());
        assert_eq!(cfg.usable_api_key(), None);

        cfg.api_key = Some("INSERT_YOUR_API_KEY_HERE".to_string());
        assert_eq!(cfg.usable_api_key(), None);

        cfg.api_key = Some(" real-key ".to_string());
        assert_eq!(cfg.usable_api_key(), Some("real-key"));
    }

    #[test]
    fn loads_partial_yaml_with_defaults() {
        let file = write_temp(
            ".yaml",
            b"server:\n  port: 9090\ntranslation:\n  api_key: secret\n  model: gemini-2.0-flash\n",
        );
        let cfg = Config::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.translation.api_key.as_deref(), Some("secret"));
        assert_eq!(cfg.translation.model, "gemini-2.0-flash");
        assert_eq!(cfg.speech.language, "ar");
        assert_eq!(cfg.speech.client, "gtx");
    }

    #[test]
    fn loads_json_with_bom() {
        let mut content = vec![0xEF, 0xBB, 0xBF];
        content.extend_from_slice(br#"{"speech": {"language": "ar", "request_timeout_ms": 500}}"#);
        let file = write_temp(".jsonld", &content);
        let cfg = Config::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(cfg.speech.request_timeout_ms, 500);
        assert_eq!(cfg.translation.request_timeout_ms, 30_000);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::load("/definitely/not/here/conf.yaml").is_err());
    }

    #[test]
    fn env_overrides_key_and_port() {
        let mut cfg = Config::default();
        cfg.apply_env_overrides(lookup_from(&[("GEMINI_API_KEY", "from-env"), ("PORT", "3000")]));
        assert_eq!(cfg.translation.api_key.as_deref(), Some("from-env"));
        assert_eq!(cfg.server.port, 3000);

        cfg.apply_env_overrides(lookup_from(&[("PORT", "not-a-port")]));
        assert_eq!(cfg.server.port, 3000);
    }
}
