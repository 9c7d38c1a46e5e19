use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use super::KeyValueStore;
use crate::errors::{LedgerError, Result};

/// Process-local key-value storage.
///
/// Clones share the same underlying map, so a handle kept by the caller observes
/// writes made through a [`super::Store`]. Switching it to read-only simulates a
/// storage quota or a disabled backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    read_only: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self
            .entries
            .lock()
            .map_err(|_| LedgerError::Persistence("memory store lock poisoned".into()))?;
        Ok(map.get(key).cloned())
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(LedgerError::Persistence(
                "storage is read-only".into(),
            ));
        }
        let mut map = self
            .entries
            .lock()
            .map_err(|_| LedgerError::Persistence("memory store lock poisoned".into()))?;
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }
}
