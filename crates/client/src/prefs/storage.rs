//! Storage backends for the preference cache

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use directories::ProjectDirs;

/// Key-value storage backend.
///
/// `save` returns whether the value was durably written; callers must not
/// treat persistence as guaranteed. Implementations never panic on backend
/// failure.
#[cfg_attr(test, mockall::automock)]
pub trait Storage: Send + Sync {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
}

/// File-backed storage keeping a JSON map in the platform config dir:
/// - Linux: `~/.config/textlands/client/storage.json`
/// - macOS: `~/Library/Application Support/io.textlands.client/storage.json`
/// - Windows: `%APPDATA%\textlands\client\storage.json`
#[derive(Clone)]
pub struct FileStorage {
    storage_path: PathBuf,
    /// In-memory copy of the stored map; disk writes go through it
    cache: Arc<RwLock<HashMap<String, String>>>,
}

impl Default for FileStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStorage {
    /// Create a storage backed by the platform config directory, loading
    /// any existing data.
    pub fn new() -> Self {
        let storage_path = if let Some(dirs) = ProjectDirs::from("io", "textlands", "client") {
            dirs.config_dir().join("storage.json")
        } else {
            // No home directory resolvable; current dir is the best we have
            PathBuf::from("textlands_storage.json")
        };
        Self::with_path(storage_path)
    }

    /// Create a storage backed by an explicit file path.
    pub fn with_path(storage_path: PathBuf) -> Self {
        let cache = if storage_path.exists() {
            match fs::read_to_string(&storage_path) {
                Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
                    Ok(map) => map,
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to parse storage file, starting empty");
                        HashMap::new()
                    }
                },
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read storage file, starting empty");
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        tracing::debug!(path = ?storage_path, "preference storage initialized");

        Self {
            storage_path,
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Write the cache to disk. Returns false when anything along the way
    /// fails; the in-memory copy stays valid for the session either way.
    fn persist(&self) -> bool {
        if let Some(parent) = self.storage_path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::error!(error = %e, "failed to create storage directory");
                return false;
            }
        }

        let cache = match self.cache.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        match serde_json::to_string_pretty(&*cache) {
            Ok(data) => match fs::write(&self.storage_path, data) {
                Ok(()) => true,
                Err(e) => {
                    tracing::error!(error = %e, "failed to write storage file");
                    false
                }
            },
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize storage data");
                false
            }
        }
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Option<String> {
        let guard = match self.cache.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) -> bool {
        {
            let mut guard = match self.cache.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.insert(key.to_string(), value.to_string());
            // Release lock before I/O
        }
        self.persist()
    }

    fn remove(&self, key: &str) -> bool {
        {
            let mut guard = match self.cache.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.remove(key);
        }
        self.persist()
    }
}

/// In-memory storage for tests and for degraded sessions where the disk
/// backend is unavailable.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    cache: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        let guard = match self.cache.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) -> bool {
        let mut guard = match self.cache.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) -> bool {
        let mut guard = match self.cache.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.remove(key);
        true
    }
}
