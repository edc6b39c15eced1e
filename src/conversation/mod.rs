//! Conversation history management.
//!
//! [`ConversationManager`] owns the ordered message history, keeps it under a
//! character bound, and hands out the two views its collaborators need: the
//! full history for the completion endpoint and the most-recent-first content
//! list the bound is measured against.

pub mod pruning;

pub use pruning::PruningPolicy;

use tracing::debug;

use crate::error::{ParleyError, Result};
use crate::provider::CompletionClient;
use crate::types::{ChatMessage, Role};

/// Fixed opening user message sent when a conversation starts.
pub const GREETING: &str = "こんにちは。";

/// Manages a conversation's message history.
///
/// ```
/// use parley::conversation::ConversationManager;
///
/// let mut conversation = ConversationManager::new();
/// conversation.append_user_message("hello");
/// conversation.append_assistant_answer("hi there");
/// assert_eq!(conversation.last_message().unwrap(), "hi there");
/// assert_eq!(conversation.conversation(), vec!["hi there".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConversationManager {
    messages: Vec<ChatMessage>,
    policy: PruningPolicy,
}

impl ConversationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: PruningPolicy) -> Self {
        Self {
            messages: Vec::new(),
            policy,
        }
    }

    pub fn policy(&self) -> PruningPolicy {
        self.policy
    }

    /// Drop every message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Restart the conversation: send the greeting and record the reply.
    ///
    /// Any existing history is cleared first. A completion failure propagates
    /// unchanged and leaves the greeting in place.
    pub async fn initialize(
        &mut self,
        client: &dyn CompletionClient,
        credential: &str,
    ) -> Result<()> {
        self.clear();
        self.append_user_message(GREETING);
        let answer = client.complete(&self.messages(), credential).await?;
        self.append_assistant_answer(answer);
        Ok(())
    }

    pub fn has_messages(&self) -> bool {
        !self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn append_user_message(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::user(text));
        self.prune();
    }

    pub fn append_assistant_answer(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(text));
        self.prune();
    }

    /// Owned snapshot of the full history, oldest first.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages.clone()
    }

    /// Contents of every message but the first, most recent first.
    pub fn conversation(&self) -> Vec<String> {
        self.recent().map(|message| message.content.clone()).collect()
    }

    /// Character length of the joined [`conversation`](Self::conversation).
    pub fn conversation_chars(&self) -> usize {
        self.recent().map(ChatMessage::char_len).sum()
    }

    /// Content of the most recently appended message.
    pub fn last_message(&self) -> Result<String> {
        self.messages
            .last()
            .map(|message| message.content.clone())
            .ok_or(ParleyError::EmptyConversation)
    }

    /// Remove the newest message if it has `role`.
    pub fn discard_last(&mut self, role: Role) -> Option<ChatMessage> {
        if self.messages.last()?.role == role {
            self.messages.pop()
        } else {
            None
        }
    }

    fn recent(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter().skip(1).rev()
    }

    fn prune(&mut self) {
        loop {
            let chars = self.conversation_chars();
            if self.messages.is_empty() || !self.policy.exceeded_by(chars) {
                return;
            }
            let removed = self.policy.batch_size.clamp(1, self.messages.len());
            self.messages.drain(..removed);
            debug!(
                removed,
                before_chars = chars,
                remaining = self.messages.len(),
                "pruned conversation history"
            );
        }
    }
}
