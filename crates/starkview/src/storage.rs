use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Synchronous, durable client-side key-value storage.
///
/// Values are JSON strings. Writes do not report failure to callers — a
/// store that cannot persist logs the problem and the session continues
/// with its in-memory state.
pub trait KeyValueStore {
    fn get_raw(&self, key: &str) -> Option<String>;
    fn set_raw(&self, key: &str, value: String);
}

/// Typed JSON access on top of any [`KeyValueStore`].
pub trait KeyValueStoreExt: KeyValueStore {
    /// Read and decode a value. A missing key or an undecodable value both
    /// read as `None` — stale entries from older formats degrade to the
    /// caller's default.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                log::debug!("discarding undecodable value for key {key}: {err}");
                None
            }
        }
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.set_raw(key, raw),
            Err(err) => log::warn!("failed to encode value for key {key}: {err}"),
        }
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("store lock poisoned")
            .get(key)
            .cloned()
    }

    fn set_raw(&self, key: &str, value: String) {
        self.entries
            .lock()
            .expect("store lock poisoned")
            .insert(key.to_string(), value);
    }
}

/// File-backed store, durable across sessions.
///
/// The whole map is read once at open and rewritten on every set, which is
/// plenty for a handful of preference keys.
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl JsonFileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| StoreError::Io(e.to_string()))?;
            serde_json::from_str(&raw).map_err(|e| StoreError::Parse(e.to_string()))?
        } else {
            HashMap::new()
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        let encoded = match serde_json::to_string_pretty(entries) {
            Ok(encoded) => encoded,
            Err(err) => {
                log::warn!("failed to encode store: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, encoded) {
            log::warn!("failed to persist store to {}: {err}", self.path.display());
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("store lock poisoned")
            .get(key)
            .cloned()
    }

    fn set_raw(&self, key: &str, value: String) {
        let mut entries = self.entries.lock().expect("store lock poisoned");
        entries.insert(key.to_string(), value);
        self.persist(&entries);
    }
}
