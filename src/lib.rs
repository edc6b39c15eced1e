//! parley: spoken chat with a chat-completion model.
//!
//! The crate keeps a bounded dialogue history ([`conversation`]), sends it to
//! a remote completion endpoint ([`provider`]), speaks each reply
//! ([`audio`]) and remembers the API key per site ([`auth`]). A
//! [`session::ChatSession`] ties these together for any front end.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use parley::prelude::*;
//!
//! # async fn example() -> parley::error::Result<()> {
//! let http = parley::provider::http::build_http_client(std::time::Duration::from_secs(60))?;
//! let session = ChatSession::new(
//!     Arc::new(OpenAiChatClient::new(http)),
//!     Arc::new(SilentSpeechOutput),
//!     Arc::new(MemoryCredentialStore::for_endpoint("https://api.openai.com/v1")?),
//! );
//! let greeting_reply = session.submit("sk-...", "").await?;
//! let reply = session.submit("sk-...", "今日の天気は？").await?;
//! println!("{greeting_reply}\n{reply}");
//! # Ok(())
//! # }
//! ```

pub mod audio;
pub mod auth;
pub mod config;
pub mod conversation;
pub mod error;
pub mod prelude;
pub mod provider;
pub mod session;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
