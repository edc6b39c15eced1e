//! Spoken output of replies.

pub mod command;
pub mod tts;
pub mod types;

pub use command::CommandSpeechOutput;
pub use tts::{SilentSpeechOutput, SpeechOutput};
pub use types::*;
