//! Key-value persistence
//!
//! Settings and rankings are stored as JSON strings under fixed keys. The
//! backend is a trait so the browser build uses LocalStorage while tests and
//! the native demo keep everything in memory.

mod memory;

#[cfg(target_arch = "wasm32")]
mod local_storage;

pub use memory::MemoryStore;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;

/// String key-value backend
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read and decode the JSON value under `key`; `Ok(None)` when absent
pub fn load_json<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(json) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|source| StorageError::Corrupt {
            key: key.to_string(),
            source,
        })
}

/// Encode `value` as JSON and store it under `key`
pub fn save_json<T: Serialize>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let store = MemoryStore::new();
        let value: Option<Vec<u32>> = load_json(&store, "nothing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_saved_value_reloads() {
        let mut store = MemoryStore::new();
        save_json(&mut store, "numbers", &vec![3, 1, 2]).unwrap();
        assert_eq!(store.raw("numbers"), Some("[3,1,2]"));
        let value: Option<Vec<u32>> = load_json(&store, "numbers").unwrap();
        assert_eq!(value, Some(vec![3, 1, 2]));
    }

    #[test]
    fn test_garbage_reports_corrupt_key() {
        let mut store = MemoryStore::new();
        store.set("numbers", "{not json").unwrap();
        let err = load_json::<Vec<u32>>(&store, "numbers").unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { ref key, .. } if key == "numbers"));
    }
}
