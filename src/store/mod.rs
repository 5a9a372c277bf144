//! Record store - transactional key-value storage for client records.
//!
//! Reads go straight through [`ClientStore`]. Writes are grouped into a
//! [`Transaction`] and applied atomically: either every queued operation is
//! durable or none is visible.
//!
//! ## Example
//!
//! ```
//! use client_book::{
//!     client_schema, ClientRecord, ClientStore, InMemoryClientStore, StoreConfig, TransactionExt,
//! };
//!
//! let store = InMemoryClientStore::open(&StoreConfig::default(), client_schema).unwrap();
//! let receipt = store
//!     .transaction()
//!     .insert(ClientRecord::new("Ann Lee", "ann@x.com", "555-123-4567"))
//!     .commit()
//!     .unwrap();
//!
//! let id = receipt.inserted[0];
//! assert_eq!(store.get(id).unwrap().unwrap().name, "Ann Lee");
//! ```

mod error;
mod in_memory;
mod schema;
mod transaction;

use crate::key::KeyCandidate;
use crate::record::{ClientRecord, RecordId};
use crate::validate::FieldName;

pub use error::StoreError;
pub use in_memory::InMemoryClientStore;
pub use schema::{client_schema, CollectionSchema, IndexSpec, SchemaBuilder, CLIENTS};
pub use transaction::{Transaction, TransactionExt};

/// A single write queued in a transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Add a new record. A blank `key` lets the store generate one; an
    /// existing key fails the transaction.
    Insert { record: ClientRecord, key: KeyCandidate },
    /// Overwrite whatever is stored under `record.id`.
    Upsert(ClientRecord),
    /// Remove the record stored under the key, if any.
    Delete(RecordId),
}

/// Keys touched by a committed transaction, in operation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReceipt {
    pub inserted: Vec<RecordId>,
    pub updated: Vec<RecordId>,
    pub deleted: Vec<RecordId>,
}

/// Storage backend for the `clients` collection.
pub trait ClientStore: Send + Sync {
    /// Every record, ordered by key.
    fn get_all(&self) -> Result<Vec<ClientRecord>, StoreError>;

    fn get(&self, id: RecordId) -> Result<Option<ClientRecord>, StoreError>;

    /// Records whose indexed `field` equals `value`, ordered by key.
    fn find_by_index(&self, field: FieldName, value: &str) -> Result<Vec<ClientRecord>, StoreError>;

    /// Apply `ops` as one atomic transaction.
    fn apply(&self, ops: &[WriteOp]) -> Result<CommitReceipt, StoreError>;
}
