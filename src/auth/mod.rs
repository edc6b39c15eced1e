//! Client-side credential persistence.

pub mod error;
pub mod site;
pub mod store;

pub use error::CredentialError;
pub use site::site_of;
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};

/// Name under which the completion API key is stored.
pub const API_KEY_NAME: &str = "apiKey";
