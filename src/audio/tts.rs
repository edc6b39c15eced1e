//! Speech output trait.

use async_trait::async_trait;

use crate::error::Result;

/// Speaks text aloud.
#[async_trait]
pub trait SpeechOutput: Send + Sync {
    /// Speak `text`, resolving once playback has finished.
    async fn speak(&self, text: &str) -> Result<()>;
}

/// Speech output that stays quiet.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSpeechOutput;

#[async_trait]
impl SpeechOutput for SilentSpeechOutput {
    async fn speak(&self, _text: &str) -> Result<()> {
        Ok(())
    }
}
