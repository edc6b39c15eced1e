//! UI-independent chat controller.
//!
//! [`ChatSession`] wires the conversation, the completion client, speech
//! output and the credential store together. Front ends only feed it text and
//! render the [`SessionEvent`]s it emits.

pub mod events;

pub use events::{SessionEvent, SessionEventSink};

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::audio::SpeechOutput;
use crate::auth::{CredentialStore, API_KEY_NAME};
use crate::conversation::{ConversationManager, PruningPolicy};
use crate::error::{ParleyError, Result};
use crate::provider::CompletionClient;
use crate::types::{ChatMessage, Role};

/// One chat session: at most one submit is in flight at any time.
pub struct ChatSession {
    id: Uuid,
    conversation: Mutex<ConversationManager>,
    client: Arc<dyn CompletionClient>,
    speech: Arc<dyn SpeechOutput>,
    credentials: Arc<dyn CredentialStore>,
    event_sink: Option<SessionEventSink>,
}

impl ChatSession {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        speech: Arc<dyn SpeechOutput>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation: Mutex::new(ConversationManager::new()),
            client,
            speech,
            credentials,
            event_sink: None,
        }
    }

    pub fn with_policy(mut self, policy: PruningPolicy) -> Self {
        self.conversation = Mutex::new(ConversationManager::with_policy(policy));
        self
    }

    pub fn with_event_sink(mut self, sink: SessionEventSink) -> Self {
        self.event_sink = Some(sink);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Credential saved by an earlier session for this site, or `""`.
    pub fn stored_credential(&self) -> Result<String> {
        Ok(self.credentials.get(API_KEY_NAME)?)
    }

    /// Send `text` and speak the reply.
    ///
    /// The first submit of a conversation starts it with the greeting
    /// exchange instead of sending `text`. Fails with [`ParleyError::Busy`]
    /// while another submit is running.
    pub async fn submit(&self, credential: &str, text: &str) -> Result<String> {
        let mut conversation = self
            .conversation
            .try_lock()
            .map_err(|_| ParleyError::Busy)?;

        // A failed save only loses the key for the next run.
        if let Err(err) = self.credentials.set(API_KEY_NAME, Some(credential)) {
            warn!(session = %self.id, site = self.credentials.site(), error = %err, "could not save credential");
        }
        self.emit(SessionEvent::Processing);

        if conversation.has_messages() {
            debug!(session = %self.id, chars = text.chars().count(), "sending user message");
            conversation.append_user_message(text);
            match self.client.complete(&conversation.messages(), credential).await {
                Ok(answer) => conversation.append_assistant_answer(answer),
                Err(err) => {
                    conversation.discard_last(Role::User);
                    warn!(session = %self.id, error = %err, "completion failed");
                    return Err(err);
                }
            }
        } else {
            info!(session = %self.id, "starting conversation");
            if let Err(err) = conversation
                .initialize(self.client.as_ref(), credential)
                .await
            {
                conversation.clear();
                warn!(session = %self.id, error = %err, "conversation start failed");
                return Err(err);
            }
        }

        let reply = conversation.last_message()?;
        self.emit(SessionEvent::Reply {
            text: reply.clone(),
        });
        self.speech.speak(&reply).await?;
        self.emit(SessionEvent::SpeechFinished);
        Ok(reply)
    }

    /// Forget the conversation; the next submit starts a new one.
    pub fn reset(&self) -> Result<()> {
        let mut conversation = self
            .conversation
            .try_lock()
            .map_err(|_| ParleyError::Busy)?;
        conversation.clear();
        info!(session = %self.id, "conversation reset");
        Ok(())
    }

    pub async fn has_messages(&self) -> bool {
        self.conversation.lock().await.has_messages()
    }

    /// Snapshot of the history, oldest first.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.conversation.lock().await.messages()
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(sink) = &self.event_sink {
            sink(event);
        }
    }
}
