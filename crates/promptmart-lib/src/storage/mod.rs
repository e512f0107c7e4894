//! Durable bearer-token storage
//!
//! The marketplace session survives restarts through a single durable
//! token slot. Absence of a stored value means logged out. The slot is a
//! shared resource: the HTTP facade clears it on 401, the session store
//! writes it on login/logout, and every request reads it.

use crate::primitives::{ConfigError, StorageError};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Abstract token slot, so tests can run without touching the filesystem
pub trait TokenStore: Send + Sync {
    /// Read the stored token, if any
    fn load(&self) -> Option<String>;

    /// Persist a token
    fn save(&self, token: &str) -> Result<(), StorageError>;

    /// Remove the stored token
    fn clear(&self) -> Result<(), StorageError>;
}

/// File-backed token store (production)
///
/// One file holding the bearer token, default location under the user's
/// data directory.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Resolve the default token file location for this platform
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dirs = directories::ProjectDirs::from("", "", "promptmart")
            .ok_or(ConfigError::NoDataDir)?;
        Ok(dirs.data_dir().join("token"))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %self.path.display(), "Failed to read token file: {}", e);
                None
            }
        }
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::WriteFailed {
                path: self.path.display().to_string(),
                source,
            })?;
        }
        std::fs::write(&self.path, token).map_err(|source| StorageError::WriteFailed {
            path: self.path.display().to_string(),
            source,
        })?;
        debug!(path = %self.path.display(), "Token persisted");
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Token cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::ClearFailed {
                path: self.path.display().to_string(),
                source,
            }),
        }
    }
}

/// In-memory token store (testing)
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
