//! Command-line front end.

pub mod key;
pub mod repl;

use clap::{Parser, Subcommand};

use crate::audio::SpeechEngine;
use crate::config::ParleyConfig;
use crate::error::Result;

/// parley CLI
#[derive(Parser, Debug)]
#[command(
    name = "parley",
    version,
    about = "Talk to a chat-completion model and hear it answer"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive spoken chat
    Chat(ChatArgs),
    /// Manage the stored API key
    Key(KeyArgs),
}

/// Arguments for the `chat` subcommand.
#[derive(Parser, Debug, Default)]
pub struct ChatArgs {
    /// Model to use (e.g. gpt-3.5-turbo)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Base URL of the chat-completion API
    #[arg(long)]
    pub base_url: Option<String>,

    /// Do not speak replies
    #[arg(long)]
    pub mute: bool,

    /// Speech engine (say, espeak-ng, espeak, custom:<program>)
    #[arg(long)]
    pub engine: Option<String>,

    /// Spoken locale (e.g. ja-JP)
    #[arg(long)]
    pub locale: Option<String>,

    /// Engine-specific voice name
    #[arg(long)]
    pub voice: Option<String>,

    /// Temperature (0.0 - 2.0)
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Max tokens per reply
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Keep the API key in memory only
    #[arg(long)]
    pub no_save: bool,
}

impl ChatArgs {
    /// Overlay the flags onto a config loaded from the environment.
    pub fn apply(&self, config: &mut ParleyConfig) -> Result<()> {
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if self.mute {
            config.muted = true;
        }
        if let Some(engine) = &self.engine {
            config.speech_engine = Some(engine.parse::<SpeechEngine>()?);
        }
        if let Some(locale) = &self.locale {
            config.speech_locale = locale.clone();
        }
        if let Some(voice) = &self.voice {
            config.speech_voice = Some(voice.clone());
        }
        if let Some(temperature) = self.temperature {
            config.completion.temperature = Some(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            config.completion.max_tokens = Some(max_tokens);
        }
        if self.no_save {
            config.save_credentials = false;
        }
        Ok(())
    }
}

/// Arguments for the `key` subcommand group.
#[derive(Parser, Debug)]
pub struct KeyArgs {
    /// Base URL whose site the key belongs to
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: KeyCommands,
}

/// Key subcommands.
#[derive(Subcommand, Debug)]
pub enum KeyCommands {
    /// Store an API key
    Set {
        /// The API key
        value: String,
    },
    /// Show the stored API key (masked)
    Show,
    /// Remove the stored API key
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_chat_with_defaults() {
        let cli = Cli::try_parse_from(["parley", "chat"]).unwrap();
        match cli.command {
            Commands::Chat(args) => {
                assert!(args.model.is_none());
                assert!(!args.mute);
                assert!(!args.no_save);
                assert!(args.temperature.is_none());
            }
            other => panic!("expected Chat, got {other:?}"),
        }
    }

    #[test]
    fn parse_chat_with_all_options() {
        let cli = Cli::try_parse_from([
            "parley",
            "chat",
            "-m",
            "gpt-4o-mini",
            "--base-url",
            "http://localhost:8080/v1",
            "--mute",
            "--engine",
            "espeak-ng",
            "--locale",
            "en-US",
            "-t",
            "0.7",
            "--max-tokens",
            "256",
            "--no-save",
        ])
        .unwrap();
        let Commands::Chat(args) = cli.command else {
            panic!("expected Chat");
        };

        let mut config = ParleyConfig::default();
        args.apply(&mut config).unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert!(config.muted);
        assert_eq!(config.speech_engine, Some(SpeechEngine::EspeakNg));
        assert_eq!(config.speech_locale, "en-US");
        assert_eq!(config.completion.temperature, Some(0.7));
        assert_eq!(config.completion.max_tokens, Some(256));
        assert!(!config.save_credentials);
    }

    #[test]
    fn unknown_engine_is_rejected_on_apply() {
        let args = ChatArgs {
            engine: Some("winamp".to_string()),
            ..Default::default()
        };
        assert!(args.apply(&mut ParleyConfig::default()).is_err());
    }

    #[test]
    fn parse_key_set_with_global_base_url() {
        let cli = Cli::try_parse_from([
            "parley",
            "key",
            "set",
            "sk-test",
            "--base-url",
            "http://localhost:8080/v1",
        ])
        .unwrap();
        match cli.command {
            Commands::Key(args) => {
                assert_eq!(args.base_url.as_deref(), Some("http://localhost:8080/v1"));
                assert!(matches!(args.command, KeyCommands::Set { ref value } if value == "sk-test"));
            }
            other => panic!("expected Key, got {other:?}"),
        }
    }

    #[test]
    fn parse_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["parley"]).is_err());
    }
}
