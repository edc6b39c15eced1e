//! Site (origin) derivation used to scope stored credentials.

use reqwest::Url;

use super::error::CredentialError;

/// Origin of `url` as `scheme://host[:port]`, lowercased.
///
/// Two endpoints share stored credentials only if their sites are equal.
pub fn site_of(url: &str) -> Result<String, CredentialError> {
    let parsed =
        Url::parse(url.trim()).map_err(|e| CredentialError::InvalidSite(format!("{url}: {e}")))?;
    if parsed.host_str().is_none() {
        return Err(CredentialError::InvalidSite(format!("{url}: no host")));
    }
    Ok(parsed.origin().ascii_serialization())
}
