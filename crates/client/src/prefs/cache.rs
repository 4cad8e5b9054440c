//! Read-through/write-through preference cache

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::storage::Storage;

/// Preference cache over a [`Storage`] backend.
///
/// Every read degrades to the caller's fallback on failure; every write
/// reports success with a flag. Nothing here returns an error or panics on
/// backend trouble.
#[derive(Clone)]
pub struct PreferenceCache {
    backend: Arc<dyn Storage>,
}

impl PreferenceCache {
    pub fn new(backend: Arc<dyn Storage>) -> Self {
        Self { backend }
    }

    /// Read a raw string value, or `fallback` when missing.
    pub fn get_string(&self, key: &str, fallback: &str) -> String {
        self.backend
            .load(key)
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Write a raw string value. Returns whether persistence succeeded.
    pub fn set_string(&self, key: &str, value: &str) -> bool {
        self.backend.save(key, value)
    }

    /// Read a JSON-serialized value.
    ///
    /// Missing key, corrupt JSON, or a failing backend all yield
    /// `fallback` - never an error.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.backend.load(key) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(key, error = %e, "corrupt preference blob, using fallback");
                    fallback
                }
            },
            None => fallback,
        }
    }

    /// Write a JSON-serialized value. Returns whether persistence
    /// succeeded; idempotent for equal values.
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> bool {
        match serde_json::to_string(value) {
            Ok(raw) => self.backend.save(key, &raw),
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to serialize preference blob");
                false
            }
        }
    }

    /// Clear a stored value.
    pub fn remove(&self, key: &str) -> bool {
        self.backend.remove(key)
    }
}
