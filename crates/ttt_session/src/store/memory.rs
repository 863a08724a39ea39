//! In-memory store.

use super::{KeyValueStore, StorageError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{instrument, trace};

/// Process-local store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::new("Memory store lock poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self.lock()?.get(key).cloned();
        trace!(found = value.is_some(), "Memory store read");
        Ok(value)
    }

    #[instrument(skip(self, value))]
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
