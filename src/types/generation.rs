//! Optional settings forwarded with each completion request.

use bon::Builder;
use serde::{Deserialize, Serialize};

/// Settings controlling text generation.
///
/// Everything is unset by default, in which case the request carries only the
/// model and the messages.
#[derive(Debug, Clone, Builder, Serialize, Deserialize, Default, PartialEq)]
pub struct CompletionOptions {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub user: Option<String>,
}

impl CompletionOptions {
    /// Whether no option is set.
    pub fn is_empty(&self) -> bool {
        self.max_tokens.is_none() && self.temperature.is_none() && self.user.is_none()
    }
}
