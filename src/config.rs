//! Application configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config:
//!
//! ```
//! use client_book::BookConfig;
//!
//! let config = BookConfig::from_json(r#"{ "store": { "version": 2 } }"#).unwrap();
//! assert_eq!(config.store.name, "CRM_Database");
//! assert_eq!(config.store.version, 2);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Which local store to open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub name: String,
    /// Schema version; must be at least 1.
    pub version: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "CRM_Database".to_string(),
            version: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    pub store: StoreConfig,
    /// How long a success notice stays visible, in milliseconds.
    pub notice_clear_ms: u64,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            notice_clear_ms: 2000,
        }
    }
}

impl BookConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn notice_clear_after(&self) -> Duration {
        Duration::from_millis(self.notice_clear_ms)
    }
}
