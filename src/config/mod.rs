//! Configuration (layered: CLI flags > env > defaults).

use std::path::PathBuf;
use std::time::Duration;

use crate::audio::{SpeechEngine, DEFAULT_LOCALE};
use crate::auth::FileCredentialStore;
use crate::conversation::PruningPolicy;
use crate::error::{ParleyError, Result};
use crate::provider::http::DEFAULT_TIMEOUT;
use crate::provider::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::types::CompletionOptions;

/// Resolved configuration for one parley process.
#[derive(Debug, Clone, PartialEq)]
pub struct ParleyConfig {
    pub base_url: String,
    pub model: String,
    /// Explicit API key; takes precedence over the stored credential.
    pub api_key: Option<String>,
    /// `None` means auto-detect.
    pub speech_engine: Option<SpeechEngine>,
    pub speech_locale: String,
    pub speech_voice: Option<String>,
    pub muted: bool,
    pub pruning: PruningPolicy,
    pub request_timeout: Duration,
    pub data_dir: PathBuf,
    pub save_credentials: bool,
    pub completion: CompletionOptions,
}

impl Default for ParleyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            speech_engine: None,
            speech_locale: DEFAULT_LOCALE.to_string(),
            speech_voice: None,
            muted: false,
            pruning: PruningPolicy::default(),
            request_timeout: DEFAULT_TIMEOUT,
            data_dir: FileCredentialStore::default_dir(),
            save_credentials: true,
            completion: CompletionOptions::default(),
        }
    }
}

impl ParleyConfig {
    /// Load from `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get("PARLEY_BASE_URL").or_else(|| get("OPENAI_BASE_URL")) {
            config.base_url = url.trim().to_string();
        }
        if let Some(model) = get("PARLEY_MODEL") {
            config.model = model.trim().to_string();
        }
        config.api_key = get("OPENAI_API_KEY").map(|key| key.trim().to_string());
        if let Some(engine) = get("PARLEY_SPEECH_ENGINE") {
            config.speech_engine = Some(engine.parse::<SpeechEngine>().map_err(|e| {
                ParleyError::Configuration(format!("PARLEY_SPEECH_ENGINE: {e}"))
            })?);
        }
        if let Some(locale) = get("PARLEY_SPEECH_LOCALE") {
            config.speech_locale = locale.trim().to_string();
        }
        config.speech_voice = get("PARLEY_SPEECH_VOICE");
        if let Some(raw) = get("PARLEY_MUTE") {
            config.muted = parse_bool(&raw).ok_or_else(|| {
                ParleyError::Configuration(format!("PARLEY_MUTE: expected a boolean, got '{raw}'"))
            })?;
        }
        if let Some(raw) = get("PARLEY_HISTORY_CHAR_LIMIT") {
            config.pruning.char_limit = parse_number("PARLEY_HISTORY_CHAR_LIMIT", &raw)?;
        }
        if let Some(raw) = get("PARLEY_HISTORY_PRUNE_BATCH") {
            config.pruning.batch_size = parse_number("PARLEY_HISTORY_PRUNE_BATCH", &raw)?;
        }
        if let Some(raw) = get("PARLEY_TIMEOUT_SECS") {
            config.request_timeout =
                Duration::from_secs(parse_number("PARLEY_TIMEOUT_SECS", &raw)?);
        }
        if let Some(home) = get("PARLEY_HOME") {
            config.data_dir = PathBuf::from(home);
        }

        Ok(config)
    }

    /// Reject values the rest of the crate cannot work with.
    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim().to_ascii_lowercase();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ParleyError::Configuration(format!(
                "Invalid base URL '{}': expected http:// or https:// URL",
                self.base_url
            )));
        }
        if self.model.trim().is_empty() {
            return Err(ParleyError::Configuration("Model cannot be empty".into()));
        }
        if self.pruning.char_limit == 0 {
            return Err(ParleyError::Configuration(
                "History character limit must be at least 1".into(),
            ));
        }
        if self.pruning.batch_size == 0 {
            return Err(ParleyError::Configuration(
                "History prune batch must be at least 1".into(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(ParleyError::Configuration(
                "Request timeout must be at least 1 second".into(),
            ));
        }
        if let Some(temperature) = self.completion.temperature {
            if !temperature.is_finite() || !(0.0..=2.0).contains(&temperature) {
                return Err(ParleyError::Configuration(
                    "Temperature must be between 0.0 and 2.0".into(),
                ));
            }
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim().parse::<T>().map_err(|_| {
        ParleyError::Configuration(format!("{key}: expected a non-negative integer, got '{raw}'"))
    })
}
