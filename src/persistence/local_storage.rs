//! Browser LocalStorage backend

use super::KeyValueStore;
use crate::error::StorageError;

/// `window.localStorage`
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Open the window's storage; fails when blocked (private mode, sandboxed iframe)
    pub fn open() -> Result<Self, StorageError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|err| StorageError::Read {
                key: key.to_string(),
                reason: format!("{err:?}"),
            })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StorageError::Write {
                key: key.to_string(),
                reason: format!("{err:?}"),
            })
    }
}
