//! # localStorage backend: browser-side persistence
//!
//! [`LocalStore`] is the [`KeyValueStore`] implementation used on the **web
//! platform**. It resolves `window.localStorage` through `web-sys` on every
//! call; the handle is cheap to obtain and is not `Clone`, so nothing is
//! cached.
//!
//! ## Error handling
//!
//! Reads and removals swallow errors (a missing or disabled storage behaves
//! like an empty one). Writes report [`StoreError`] so that a login whose
//! token cannot be persisted is surfaced to the user instead of looping back
//! to the login page.

use crate::error::StoreError;
use crate::token::KeyValueStore;

/// `window.localStorage`-backed KeyValueStore.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StoreError::WriteRejected {
                key: key.to_string(),
            })
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
