use thiserror::Error;

use crate::record::RecordId;

/// Failures reported by a [`ClientStore`](super::ClientStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A unique index already maps `value` to another record.
    #[error("unique index `{index}` already contains {value:?}")]
    ConstraintViolation { index: String, value: String },
    /// Insert targeted a key that is already present.
    #[error("key {0} already exists")]
    KeyExists(RecordId),
    /// The key shape is not one this collection stores.
    #[error("key {key} is not supported by collection `{collection}`")]
    UnsupportedKey { collection: String, key: String },
    /// A write needed a key and the collection cannot generate one.
    #[error("collection `{0}` requires an explicit key")]
    MissingKey(String),
    #[error("invalid store version {0}")]
    InvalidVersion(u32),
    #[error("collection `{0}` does not exist")]
    MissingCollection(String),
    #[error("index `{0}` does not exist")]
    MissingIndex(String),
    #[error("record serialization error: {0}")]
    Serde(String),
    #[error("storage error: {0}")]
    Storage(String),
}
