//! Shared API client constructor for all platforms.
//!
//! Returns an [`api::ApiClient`] whose token store is backed by the appropriate
//! [`store::KeyValueStore`]:
//! - **Web** (WASM + `web` feature): `window.localStorage` via `store::LocalStore`
//! - **Everything else** (native builds, tests): [`store::MemoryStore`]

use store::{ClientConfig, TokenStore};

/// Key/value backend the token lives in on this platform.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStore;

/// Key/value backend the token lives in on this platform.
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStore = store::MemoryStore;

/// The API client type used throughout the UI.
pub type Client = api::ApiClient<PlatformStore>;

/// Create the platform-appropriate API client for `config`.
pub fn make_client(config: &ClientConfig) -> Client {
    let tokens = TokenStore::with_key(PlatformStore::new(), config.storage.token_key.clone());
    api::ApiClient::new(config.api.base_url.clone(), tokens)
}
