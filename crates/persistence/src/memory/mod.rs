//! In-memory key-value store for tests and demos

use crate::store::KeyValueStore;
use async_trait::async_trait;
use fitledger_core::{Error, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

/// HashMap-backed store. Not persistent across process restarts.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with pre-existing values (simulates prior sessions)
    pub fn with_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: RwLock::new(entries.into_iter().collect()),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make every subsequent write fail, to exercise the best-effort
    /// persistence path in tests
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::StorageError("simulated write failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| Error::StorageError("store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        let mut entries = self
            .entries
            .write()
            .map_err(|_| Error::StorageError("store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_many(&self, pairs: &[(String, String)]) -> Result<()> {
        self.check_writable()?;
        let mut entries = self
            .entries
            .write()
            .map_err(|_| Error::StorageError("store lock poisoned".into()))?;
        for (key, value) in pairs {
            entries.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    async fn remove_many(&self, keys: &[&str]) -> Result<()> {
        self.check_writable()?;
        let mut entries = self
            .entries
            .write()
            .map_err(|_| Error::StorageError("store lock poisoned".into()))?;
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }
}
