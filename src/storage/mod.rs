//! Persistence bridge: an opaque get/set key-value slot.
//!
//! The ledger only ever sees the two-operation [`KeyValueStore`] contract;
//! the file-backed implementation lives in [`file_store`].

pub mod file_store;

use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::BooksError;

pub type Result<T> = std::result::Result<T, BooksError>;

/// Abstraction over the persisted slot the aggregate document mirrors into.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored text for `key`, or `None` when nothing was saved.
    fn load(&self, key: &str) -> Result<Option<String>>;
    /// Overwrites the stored text for `key`.
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store for tests and embedding scenarios.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| BooksError::Storage("memory store poisoned".into()))?;
        Ok(slots.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| BooksError::Storage("memory store poisoned".into()))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }
}

pub use file_store::FileStore;
