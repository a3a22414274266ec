pub mod cache;
pub mod config;
pub mod error;
pub mod token;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStore;

pub use cache::{now_millis, Lookup, QueryCache, QueryData, QueryKey, QueryOptions};
pub use config::ClientConfig;
pub use error::StoreError;
pub use token::{KeyValueStore, TokenStore, AUTH_TOKEN_KEY};
