//! Shared test helpers: stub completion client and recording speech output.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Notify;

use parley::audio::SpeechOutput;
use parley::error::{ParleyError, Result};
use parley::provider::CompletionClient;
use parley::types::ChatMessage;

/// A completion client that returns canned replies and records requests.
#[derive(Default)]
pub struct StubCompletionClient {
    replies: Mutex<VecDeque<Result<String>>>,
    requests: Mutex<Vec<(Vec<ChatMessage>, String)>>,
}

impl StubCompletionClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a text reply.
    pub fn queue_reply(&self, text: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(text.to_string()));
    }

    /// Queue a failure.
    pub fn queue_error(&self, error: ParleyError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    /// Every `(messages, credential)` pair received so far.
    pub fn requests(&self) -> Vec<(Vec<ChatMessage>, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for StubCompletionClient {
    async fn complete(&self, messages: &[ChatMessage], credential: &str) -> Result<String> {
        self.requests
            .lock()
            .unwrap()
            .push((messages.to_vec(), credential.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Mock reply".to_string()))
    }
}

/// A completion client that blocks until released.
#[derive(Default)]
pub struct GatedCompletionClient {
    pub gate: Notify,
}

#[async_trait]
impl CompletionClient for GatedCompletionClient {
    async fn complete(&self, _messages: &[ChatMessage], _credential: &str) -> Result<String> {
        self.gate.notified().await;
        Ok("released".to_string())
    }
}

/// Speech output that records what it was asked to say.
#[derive(Default)]
pub struct RecordingSpeech {
    spoken: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            spoken: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechOutput for RecordingSpeech {
    async fn speak(&self, text: &str) -> Result<()> {
        if self.fail {
            return Err(ParleyError::Speech("no audio device".to_string()));
        }
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Joined UTF-16 length of every message but the first.
pub fn recent_chars(messages: &[ChatMessage]) -> usize {
    messages.iter().skip(1).map(|m| m.content.encode_utf16().count()).sum()
}
