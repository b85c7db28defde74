//! In-memory store implementation.

use crate::{KeyValueStore, StoreError};
use std::collections::HashMap;
use std::sync::RwLock;

/// A `HashMap`-backed store for tests and single-process deployments.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Check whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::StoreError(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::StoreError(e.to_string()))?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::StoreError(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_delete() {
        let store = MemoryStore::new();
        store.set_raw("k", b"v").unwrap();
        assert_eq!(store.get_raw("k").unwrap(), Some(b"v".to_vec()));
        assert!(store.exists("k").unwrap());

        store.delete("k").unwrap();
        assert_eq!(store.get_raw("k").unwrap(), None);
        assert!(!store.exists("k").unwrap());
    }

    #[test]
    fn test_delete_absent_key_ok() {
        let store = MemoryStore::new();
        assert!(store.delete("absent").is_ok());
    }

    #[test]
    fn test_len() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        store.set_raw("a", b"1").unwrap();
        store.set_raw("b", b"2").unwrap();
        assert_eq!(store.len(), 2);
    }
}
