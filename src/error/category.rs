//! Error classification for user-facing reporting.

/// Broad error category, used by front ends to pick a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Network,
    Server,
    Api,
    Configuration,
    Credential,
    Serialization,
    Speech,
    State,
}

/// Suggested next step for the operator.
///
/// Nothing in the crate acts on these automatically: the operator re-submits
/// by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    CheckCredentials,
    WaitAndResubmit,
    CheckConnection,
    CheckConfiguration,
    CheckSpeechEngine,
    Resubmit,
    None,
}

impl RecoverySuggestion {
    /// Short human-readable hint, or `None` when there is nothing to add.
    pub fn hint(self) -> Option<&'static str> {
        match self {
            Self::CheckCredentials => Some("check your API key (/key <value>)"),
            Self::WaitAndResubmit => Some("wait a moment, then submit again"),
            Self::CheckConnection => Some("check your network connection and submit again"),
            Self::CheckConfiguration => Some("check PARLEY_* environment variables and flags"),
            Self::CheckSpeechEngine => Some("check the speech engine or run with --mute"),
            Self::Resubmit => Some("submit again"),
            Self::None => None,
        }
    }
}
