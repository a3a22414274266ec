//! # Token store: the persisted bearer credential
//!
//! The only state this application persists is the bearer token returned by
//! the login and signup endpoints. It lives in the browser's `localStorage`
//! under a fixed key ([`AUTH_TOKEN_KEY`] unless configured otherwise) and is
//! read on startup (session hydration) and on every outgoing request.
//!
//! ## [`KeyValueStore`] trait
//!
//! A synchronous string-to-string interface shaped like the Web Storage API:
//! `get_item` / `set_item` / `remove_item`. Implementations live in sibling
//! modules ([`crate::memory`] for tests and native builds, `crate::local` for
//! the browser).
//!
//! ## [`TokenStore`]
//!
//! Wraps a [`KeyValueStore`] and a key. Writes happen only on login, logout
//! and forced expiry; everything else reads.
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`get`](TokenStore::get) | Current token; an empty string counts as absent. |
//! | [`set`](TokenStore::set) | Persists a new token. |
//! | [`clear`](TokenStore::clear) | Removes the token. Idempotent. |
//! | [`is_present`](TokenStore::is_present) | Whether a token is stored. |

use crate::error::StoreError;

/// Default `localStorage` key holding the bearer token.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Web-Storage-shaped key/value backend.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&self, key: &str);
}

/// The bearer token, persisted in a [`KeyValueStore`].
#[derive(Clone, Debug)]
pub struct TokenStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> TokenStore<S> {
    /// Token store using the default [`AUTH_TOKEN_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, AUTH_TOKEN_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self) -> Option<String> {
        self.store
            .get_item(&self.key)
            .filter(|token| !token.is_empty())
    }

    pub fn is_present(&self) -> bool {
        self.get().is_some()
    }

    pub fn set(&self, token: &str) -> Result<(), StoreError> {
        self.store.set_item(&self.key, token)
    }

    pub fn clear(&self) {
        self.store.remove_item(&self.key);
    }
}
