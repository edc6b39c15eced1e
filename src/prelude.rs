//! Convenience re-exports for common use.

pub use crate::audio::{CommandSpeechOutput, SilentSpeechOutput, SpeechOutput};
pub use crate::auth::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use crate::config::ParleyConfig;
pub use crate::conversation::{ConversationManager, PruningPolicy};
pub use crate::error::{ParleyError, Result};
pub use crate::provider::{CompletionClient, OpenAiChatClient};
pub use crate::session::{ChatSession, SessionEvent};
pub use crate::types::{ChatMessage, CompletionOptions, Role};
