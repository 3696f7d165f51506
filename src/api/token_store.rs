use log::{debug, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::entity::ApiError;

/// Persisted storage for the bearer token
pub trait TokenStore: Send + Sync {
    /// Current token, `None` when absent or blank
    fn load(&self) -> Option<String>;

    fn save(&self, token: &str) -> Result<(), ApiError>;

    fn clear(&self) -> Result<(), ApiError>;
}

/// Keeps the token in a single file on disk
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                (!token.is_empty()).then(|| token.to_string())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read token from {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&self, token: &str) -> Result<(), ApiError> {
        fs::write(&self.path, token).map_err(|e| {
            ApiError::TokenStore(format!("failed to write {}: {}", self.path.display(), e))
        })?;
        debug!("Token saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), ApiError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::TokenStore(format!(
                "failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

/// Process-local token, nothing touches the disk
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: RwLock::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        let guard = self.token.read().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().filter(|t| !t.trim().is_empty()).cloned()
    }

    fn save(&self, token: &str) -> Result<(), ApiError> {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ApiError> {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_and_ignores_blank() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));

        assert_eq!(store.load(), None);
        store.save("abc").unwrap();
        assert_eq!(store.load().as_deref(), Some("abc"));

        store.save("   \n").unwrap();
        assert_eq!(store.load(), None);

        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn memory_store_clears() {
        let store = MemoryTokenStore::with_token("t");
        assert_eq!(store.load().as_deref(), Some("t"));
        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }
}
