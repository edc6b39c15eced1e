use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::CredentialError;
use super::site::site_of;

const FILE_NAME: &str = "credentials.toml";
const FILE_VERSION: u32 = 1;

/// Persistence for small named credential strings.
///
/// Every store is bound to one site; values saved for one site are invisible
/// to a store bound to another.
pub trait CredentialStore: Send + Sync {
    /// Store `value` under `name` (`None` stores the empty string) and return
    /// what was stored.
    fn set(&self, name: &str, value: Option<&str>) -> Result<String, CredentialError>;
    /// Stored value, or the empty string when absent.
    fn get(&self, name: &str) -> Result<String, CredentialError>;
    fn clear(&self, name: &str) -> Result<(), CredentialError>;
    /// Site this store is bound to.
    fn site(&self) -> &str;
}

/// File-backed credential store using a TOML file.
///
/// # Example
/// ```no_run
/// use parley::auth::{CredentialStore, FileCredentialStore};
///
/// let store = FileCredentialStore::for_endpoint(
///     FileCredentialStore::default_dir(),
///     "https://api.openai.com/v1",
/// )?;
/// store.set("apiKey", Some("sk-..."))?;
/// assert_eq!(store.get("apiKey")?, "sk-...");
/// # Ok::<(), parley::auth::CredentialError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
    site: String,
}

impl FileCredentialStore {
    /// Store in `base_dir` bound to the site of `endpoint`.
    pub fn for_endpoint(base_dir: PathBuf, endpoint: &str) -> Result<Self, CredentialError> {
        Ok(Self {
            path: base_dir.join(FILE_NAME),
            site: site_of(endpoint)?,
        })
    }

    /// `~/.parley`, or `.parley` when no home directory is known.
    pub fn default_dir() -> PathBuf {
        directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().join(".parley"))
            .unwrap_or_else(|| PathBuf::from(".parley"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<CredentialFile, CredentialError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(CredentialFile::default())
            }
            Err(err) => return Err(err.into()),
        };
        let file: CredentialFile = toml::from_str(&raw)?;
        if file.version != FILE_VERSION {
            return Err(CredentialError::UnsupportedVersion(file.version));
        }
        Ok(file)
    }

    fn write_file(&self, file: &CredentialFile) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let serialized = toml::to_string(file)?;
        fs::write(&self.path, serialized)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn set(&self, name: &str, value: Option<&str>) -> Result<String, CredentialError> {
        let value = value.unwrap_or_default().to_string();
        let mut file = self.read_file()?;
        file.entries
            .retain(|entry| !(entry.site == self.site && entry.name == name));
        file.entries.push(CredentialEntry {
            site: self.site.clone(),
            name: name.to_string(),
            value: value.clone(),
            saved_at: Utc::now(),
        });
        self.write_file(&file)?;
        debug!(site = %self.site, name, "credential saved");
        Ok(value)
    }

    fn get(&self, name: &str) -> Result<String, CredentialError> {
        Ok(self
            .read_file()?
            .entries
            .into_iter()
            .find(|entry| entry.site == self.site && entry.name == name)
            .map(|entry| entry.value)
            .unwrap_or_default())
    }

    fn clear(&self, name: &str) -> Result<(), CredentialError> {
        let mut file = self.read_file()?;
        let before = file.entries.len();
        file.entries
            .retain(|entry| !(entry.site == self.site && entry.name == name));
        if file.entries.len() != before {
            self.write_file(&file)?;
        }
        Ok(())
    }

    fn site(&self) -> &str {
        &self.site
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CredentialFile {
    version: u32,
    #[serde(default)]
    entries: Vec<CredentialEntry>,
}

impl Default for CredentialFile {
    fn default() -> Self {
        Self {
            version: FILE_VERSION,
            entries: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CredentialEntry {
    site: String,
    name: String,
    value: String,
    saved_at: DateTime<Utc>,
}

/// In-memory credential store, lost when the process exits.
#[derive(Debug)]
pub struct MemoryCredentialStore {
    site: String,
    values: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn for_endpoint(endpoint: &str) -> Result<Self, CredentialError> {
        Ok(Self {
            site: site_of(endpoint)?,
            values: RwLock::new(HashMap::new()),
        })
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn set(&self, name: &str, value: Option<&str>) -> Result<String, CredentialError> {
        let value = value.unwrap_or_default().to_string();
        self.values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(name.to_string(), value.clone());
        Ok(value)
    }

    fn get(&self, name: &str) -> Result<String, CredentialError> {
        Ok(self
            .values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(name)
            .cloned()
            .unwrap_or_default())
    }

    fn clear(&self, name: &str) -> Result<(), CredentialError> {
        self.values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(name);
        Ok(())
    }

    fn site(&self) -> &str {
        &self.site
    }
}
