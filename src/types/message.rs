//! Message types exchanged with the completion endpoint.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Conversation role.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// Reserved by the wire format; never produced by parley itself.
    System,
    User,
    Assistant,
}

/// One turn in a conversation.
///
/// Serializes to exactly `{"role": "...", "content": "..."}`, the shape the
/// chat-completion endpoint expects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
        }
    }

    /// Length of the content in UTF-16 code units.
    ///
    /// Characters outside the Basic Multilingual Plane count twice.
    pub fn char_len(&self) -> usize {
        self.content.encode_utf16().count()
    }
}
