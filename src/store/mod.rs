//! Local key-value persistence with JSON values.
//!
//! [`LocalStore`] fails soft: when no backend is available, or a value cannot
//! be read or parsed, reads return the caller's default and the failure is
//! logged. Only [`LocalStore::try_write`] reports errors to the caller.

pub mod file;
pub mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use crate::error::{Result, TranslateError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

pub const HISTORY_KEY: &str = "ved_translation_history";
pub const SAVED_WORDS_KEY: &str = "ved_saved_words";

/// Raw string storage addressed by key.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct LocalStore {
    backend: Option<Arc<dyn StorageBackend>>,
}

impl LocalStore {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Some(Arc::new(backend)),
        }
    }

    /// A store with nothing behind it: reads yield defaults, writes are dropped.
    pub fn unavailable() -> Self {
        Self { backend: None }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// File-backed store under `dir`, or an unavailable store if there is no
    /// directory to use.
    pub fn open(dir: Option<PathBuf>) -> Self {
        match dir {
            Some(dir) => Self::new(FileBackend::new(dir)),
            None => {
                warn!("No data directory available, history will not be kept");
                Self::unavailable()
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(backend) = &self.backend else {
            return default;
        };

        let raw = match backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                warn!("Error reading storage key \"{}\": {}", key, e);
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Error parsing storage key \"{}\": {}", key, e);
                default
            }
        }
    }

    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_write(key, value) {
            warn!("Error writing storage key \"{}\": {}", key, e);
        }
    }

    pub fn try_write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let Some(backend) = &self.backend else {
            debug!("Storage unavailable, dropping write to \"{}\"", key);
            return Ok(());
        };
        let json = serde_json::to_string(value)?;
        backend.set(key, &json)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        match &self.backend {
            Some(backend) => backend.remove(key),
            None => Ok(()),
        }
    }
}

pub(crate) fn check_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(TranslateError::Persistence(format!(
            "Invalid storage key: {:?}",
            key
        )))
    }
}
