//! Speech engine selection and settings.

use std::fmt;
use std::str::FromStr;

use crate::error::ParleyError;

/// Default spoken locale.
pub const DEFAULT_LOCALE: &str = "ja-JP";

/// Platform text-to-speech program used for playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEngine {
    /// macOS `say`.
    Say,
    /// `espeak-ng`.
    EspeakNg,
    /// Legacy `espeak`.
    Espeak,
    /// Any program that reads the text on stdin; the first word is the
    /// program, the rest are arguments.
    Custom(String),
}

impl SpeechEngine {
    /// Pick the first engine available on this machine.
    pub fn detect() -> Option<Self> {
        if cfg!(target_os = "macos") {
            return Some(Self::Say);
        }
        [Self::EspeakNg, Self::Espeak]
            .into_iter()
            .find(|engine| program_on_path(engine.program()))
    }

    /// Executable name.
    pub fn program(&self) -> &str {
        match self {
            Self::Say => "say",
            Self::EspeakNg => "espeak-ng",
            Self::Espeak => "espeak",
            Self::Custom(command) => command.split_whitespace().next().unwrap_or_default(),
        }
    }

    /// Arguments for speaking stdin in `locale`, optionally with an explicit voice.
    pub fn args(&self, locale: &str, voice: Option<&str>) -> Vec<String> {
        match self {
            Self::Say => {
                let mut args = vec!["-f".to_string(), "-".to_string()];
                if let Some(voice) = voice.map(str::to_string).or_else(|| say_voice(locale)) {
                    args.push("-v".to_string());
                    args.push(voice);
                }
                args
            }
            Self::EspeakNg | Self::Espeak => {
                let voice = voice
                    .map(str::to_string)
                    .unwrap_or_else(|| locale_language(locale));
                vec!["--stdin".to_string(), "-v".to_string(), voice]
            }
            Self::Custom(command) => command.split_whitespace().skip(1).map(str::to_string).collect(),
        }
    }
}

impl fmt::Display for SpeechEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Say => f.write_str("say"),
            Self::EspeakNg => f.write_str("espeak-ng"),
            Self::Espeak => f.write_str("espeak"),
            Self::Custom(command) => write!(f, "custom:{command}"),
        }
    }
}

impl FromStr for SpeechEngine {
    type Err = ParleyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if let Some(command) = trimmed.strip_prefix("custom:") {
            if command.trim().is_empty() {
                return Err(ParleyError::InvalidArgument(
                    "custom speech engine needs a program".to_string(),
                ));
            }
            return Ok(Self::Custom(command.trim().to_string()));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "say" => Ok(Self::Say),
            "espeak-ng" | "espeak_ng" => Ok(Self::EspeakNg),
            "espeak" => Ok(Self::Espeak),
            other => Err(ParleyError::InvalidArgument(format!(
                "Unknown speech engine: '{other}' (expected say, espeak-ng, espeak or custom:<program>)"
            ))),
        }
    }
}

/// Settings for one speech output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechSettings {
    pub engine: SpeechEngine,
    pub locale: String,
    pub voice: Option<String>,
}

impl SpeechSettings {
    pub fn new(engine: SpeechEngine) -> Self {
        Self {
            engine,
            locale: DEFAULT_LOCALE.to_string(),
            voice: None,
        }
    }
}

fn locale_language(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
        .to_ascii_lowercase()
}

fn say_voice(locale: &str) -> Option<String> {
    let voice = match locale_language(locale).as_str() {
        "ja" => "Kyoko",
        "en" => "Samantha",
        "zh" => "Tingting",
        "ko" => "Yuna",
        "fr" => "Thomas",
        "de" => "Anna",
        _ => return None,
    };
    Some(voice.to_string())
}

fn program_on_path(program: &str) -> bool {
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}
