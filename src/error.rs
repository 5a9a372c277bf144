use thiserror::Error;

use crate::key::KeyCandidate;
use crate::store::StoreError;
use crate::validate::FieldName;

/// Failures of a client-book operation. None of them are fatal: the book
/// stays usable and the caller may retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Some fields fail their validator. Nothing was sent to the store.
    #[error("invalid fields {fields:?}")]
    InvalidForm { fields: Vec<FieldName> },
    /// The form's editing id is not a whole, finite key. Nothing was sent to
    /// the store.
    #[error("invalid edit key {raw}")]
    InvalidEditKey { raw: f64 },
    /// An insert carried an explicit key the store cannot index. Nothing was
    /// sent to the store.
    #[error("invalid insert key {key}")]
    InvalidInsertKey { key: KeyCandidate },
    /// The store never opened.
    #[error("client store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
    /// The store rejected a write; no part of it was applied.
    #[error("transaction failed: {0}")]
    TransactionFailure(#[source] StoreError),
    #[error("read failed: {0}")]
    ReadFailure(#[source] StoreError),
}
