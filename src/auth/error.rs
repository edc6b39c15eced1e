use thiserror::Error;

use crate::error::ParleyError;

/// Failures of the credential store.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Invalid site: {0}")]
    InvalidSite(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Unsupported credential file version {0}")]
    UnsupportedVersion(u32),
}

impl From<std::io::Error> for CredentialError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<toml::de::Error> for CredentialError {
    fn from(error: toml::de::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<toml::ser::Error> for CredentialError {
    fn from(error: toml::ser::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<CredentialError> for ParleyError {
    fn from(error: CredentialError) -> Self {
        ParleyError::Credential(error.to_string())
    }
}
