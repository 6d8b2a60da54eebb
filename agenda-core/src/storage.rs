//! Key-value storage port.
//!
//! The event store only needs "read a string slot" and "write a string slot".
//! [`FileStore`] keeps each slot as a JSON file in the data directory;
//! [`MemoryStore`] keeps them in a map.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{AgendaError, AgendaResult};

pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if nothing was ever written.
    fn get(&self, key: &str) -> AgendaResult<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> AgendaResult<()>;
}

/// Slots stored as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> AgendaResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> AgendaResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            AgendaError::Storage(format!("Could not create {}: {}", self.dir.display(), e))
        })?;

        // Write to a sibling first so a crash never leaves a half-written slot.
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        std::fs::write(&tmp, value)
            .map_err(|e| AgendaError::Storage(format!("Could not write {}: {}", tmp.display(), e)))?;
        if let Err(e) = std::fs::rename(&tmp, &path) {
            if let Err(cleanup) = std::fs::remove_file(&tmp) {
                tracing::warn!(path = %tmp.display(), error = %cleanup, "could not remove temp file");
            }
            return Err(AgendaError::Storage(format!(
                "Could not replace {}: {}",
                path.display(),
                e
            )));
        }

        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote storage slot");
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with `key` already holding `value`.
    pub fn with_slot(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.slots.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AgendaResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> AgendaResult<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
