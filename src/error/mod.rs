//! Error types for parley.

pub mod category;

pub use category::{ErrorCategory, RecoverySuggestion};

use thiserror::Error;

/// Primary error type for all parley operations.
#[derive(Error, Debug)]
pub enum ParleyError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Credential store error: {0}")]
    Credential(String),

    #[error("Speech error: {0}")]
    Speech(String),

    #[error("Conversation is empty")]
    EmptyConversation,

    #[error("Another request is already in flight")]
    Busy,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ParleyError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::RateLimited { .. } => ErrorCategory::RateLimit,
            Self::Network(_) => ErrorCategory::Network,
            Self::Configuration(_) | Self::InvalidArgument(_) => ErrorCategory::Configuration,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Credential(_) | Self::Io(_) => ErrorCategory::Credential,
            Self::Speech(_) => ErrorCategory::Speech,
            Self::EmptyConversation | Self::Busy => ErrorCategory::State,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
        }
    }

    /// Suggest what the operator should do next.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::Authentication => RecoverySuggestion::CheckCredentials,
            ErrorCategory::RateLimit | ErrorCategory::Server => RecoverySuggestion::WaitAndResubmit,
            ErrorCategory::Network => RecoverySuggestion::CheckConnection,
            ErrorCategory::Configuration | ErrorCategory::Credential => {
                RecoverySuggestion::CheckConfiguration
            }
            ErrorCategory::Speech => RecoverySuggestion::CheckSpeechEngine,
            ErrorCategory::Api | ErrorCategory::Serialization => RecoverySuggestion::Resubmit,
            ErrorCategory::State => RecoverySuggestion::None,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ParleyError>;
