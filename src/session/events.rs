//! Events emitted while a submit is processed.

use std::sync::Arc;

/// Progress of one submit, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The request has been accepted and is in flight.
    Processing,
    /// The assistant reply is known; speech starts next.
    Reply { text: String },
    /// Playback of the reply has finished.
    SpeechFinished,
}

/// Callback receiving session events.
pub type SessionEventSink = Arc<dyn Fn(SessionEvent) + Send + Sync>;
