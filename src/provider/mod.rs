//! Remote completion client trait and implementations.

pub mod http;
pub mod openai;

pub use openai::OpenAiChatClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::ChatMessage;

/// Turns a message history into the next assistant reply.
///
/// Implementations must transmit `messages` in order and return the text of
/// the first completion choice. Failures (network, credential, malformed
/// response) are returned as errors and never retried.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage], credential: &str) -> Result<String>;
}
