//! Speech output backed by an external text-to-speech program.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use super::tts::SpeechOutput;
use super::types::SpeechSettings;
use crate::error::{ParleyError, Result};

/// Runs the configured engine once per utterance, feeding the text on stdin
/// and waiting for the process to exit.
#[derive(Debug, Clone)]
pub struct CommandSpeechOutput {
    settings: SpeechSettings,
}

impl CommandSpeechOutput {
    pub fn new(settings: SpeechSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SpeechSettings {
        &self.settings
    }
}

#[async_trait]
impl SpeechOutput for CommandSpeechOutput {
    async fn speak(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Ok(());
        }

        let engine = &self.settings.engine;
        let program = engine.program();
        let args = engine.args(&self.settings.locale, self.settings.voice.as_deref());
        debug!(engine = %engine, locale = %self.settings.locale, chars = text.chars().count(), "speaking");

        let mut child = Command::new(program)
            .args(&args)
            .env("PARLEY_SPEECH_LOCALE", &self.settings.locale)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ParleyError::Speech(format!("failed to start '{program}': {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            // A program may exit without draining stdin; its exit status decides.
            if let Err(e) = stdin.write_all(text.as_bytes()).await {
                debug!(error = %e, "speech engine closed stdin early");
            }
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| ParleyError::Speech(format!("'{program}' did not finish: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ParleyError::Speech(format!(
                "'{program}' exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}
