//! Key-value store interface with automatic serialization.
//!
//! The original front end kept phone numbers, drafts, and consent flags in
//! ambient browser-local storage. Here that becomes an explicit interface:
//! components that need persistence take a [`KeyValueStore`] rather than
//! reaching into a hidden global. Values are JSON-serialized, so any
//! `Serialize`/`DeserializeOwned` type round-trips.

pub mod error;
pub mod memory;

pub use error::StoreError;
pub use memory::MemoryStore;

use serde::{de::DeserializeOwned, Serialize};

/// A typed key-value store.
///
/// Implementations must be safe to share across threads; callers hold them
/// behind `Arc<dyn KeyValueStore>`.
pub trait KeyValueStore: Send + Sync {
    /// Get the raw bytes for a key, `None` if absent.
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Set the raw bytes for a key.
    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Delete a key. Deleting an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get_raw(key)?.is_some())
    }
}

/// Extension methods providing typed access over the raw byte interface.
pub trait KeyValueStoreExt: KeyValueStore {
    /// Get and deserialize a value.
    ///
    /// Returns `None` if the key doesn't exist.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Serialize and store a value.
    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)?;
        self.set_raw(key, &bytes)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}

/// Helper to build store keys with namespacing.
///
/// # Example
///
/// ```rust,ignore
/// let key = store_key!("consent", customer_id);
/// // Returns "consent:cust123"
/// ```
#[macro_export]
macro_rules! store_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}
