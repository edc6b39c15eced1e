//! `parley key` handlers.

use crate::auth::{CredentialStore, FileCredentialStore, API_KEY_NAME};
use crate::config::ParleyConfig;
use crate::error::Result;

use super::{KeyArgs, KeyCommands};

/// Handle `parley key <set|show|clear>`.
pub fn handle_key(args: KeyArgs, mut config: ParleyConfig) -> Result<()> {
    if let Some(url) = args.base_url {
        config.base_url = url;
    }
    config.validate()?;
    let store = FileCredentialStore::for_endpoint(config.data_dir.clone(), &config.base_url)?;

    match args.command {
        KeyCommands::Set { value } => {
            store.set(API_KEY_NAME, Some(value.trim()))?;
            println!("Saved API key for {}", store.site());
        }
        KeyCommands::Show => {
            let value = store.get(API_KEY_NAME)?;
            if value.is_empty() {
                println!("No API key stored for {}", store.site());
            } else {
                println!("{}: {}", store.site(), mask_secret(&value));
            }
        }
        KeyCommands::Clear => {
            store.clear(API_KEY_NAME)?;
            println!("Removed API key for {}", store.site());
        }
    }
    Ok(())
}

/// Show the first three and last four characters of long secrets only.
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 10 {
        return "*".repeat(chars.len().max(4));
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
