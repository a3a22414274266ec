//! # Client configuration: `client.toml`
//!
//! Defines the TOML configuration the web application is built with. The web
//! crate embeds its `client.toml` at compile time and parses it at startup;
//! everything has a production default, so a missing section (or an entirely
//! empty file) is equivalent to [`ClientConfig::default`].
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:3000/api"
//!
//! [storage]
//! token_key = "authToken"
//!
//! [cache]
//! regions_stale_secs = 300
//!
//! [search]
//! page_size = 20
//!
//! [payment]
//! publishable_key = "pk_test_..."
//! price_label = "€49.90"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ClientConfig`] | Top-level config with builder helpers and TOML (de)serialisation. |
//! | [`ApiConfig`] | Base URL of the REST API (including the `/api` prefix). |
//! | [`StorageConfig`] | `localStorage` key for the bearer token. |
//! | [`CacheConfig`] | Freshness window of the regions query. |
//! | [`SearchConfig`] | Default page size of creator searches. |
//! | [`PaymentConfig`] | Payment provider publishable key and the displayed price. |
//! | [`LoggingConfig`] | Log level for the browser console logger. |

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::token::AUTH_TOKEN_KEY;

/// Top-level configuration stored in `client.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub payment: PaymentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_token_key")]
    pub token_key: String,
}

fn default_token_key() -> String {
    AUTH_TOKEN_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            token_key: default_token_key(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long the region list stays fresh, in seconds.
    #[serde(default = "default_regions_stale_secs")]
    pub regions_stale_secs: u64,
}

fn default_regions_stale_secs() -> u64 {
    5 * 60
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            regions_stale_secs: default_regions_stale_secs(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    20
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Publishable (browser-safe) key of the payment provider.
    #[serde(default)]
    pub publishable_key: String,
    #[serde(default = "default_price_label")]
    pub price_label: String,
}

fn default_price_label() -> String {
    "€49.90".to_string()
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            publishable_key: String::new(),
            price_label: default_price_label(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl ClientConfig {
    /// Builder method to point the client at another API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "client.toml"
    }

    /// Freshness window of the regions query.
    pub fn regions_stale_time(&self) -> Duration {
        Duration::from_secs(self.cache.regions_stale_secs)
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert_eq!(config.storage.token_key, "authToken");
        assert_eq!(config.regions_stale_time(), Duration::from_secs(300));
        assert_eq!(config.search.page_size, 20);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = ClientConfig::from_toml(
            r#"
            [api]
            base_url = "https://api.example.com/api"

            [payment]
            publishable_key = "pk_test_123"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://api.example.com/api");
        assert_eq!(config.payment.publishable_key, "pk_test_123");
        assert_eq!(config.payment.price_label, "€49.90");
        assert_eq!(config.cache.regions_stale_secs, 300);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:9000/api");
        let text = config.to_toml().unwrap();
        assert_eq!(ClientConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(ClientConfig::from_toml("[api\nbase_url = 1").is_err());
    }
}
