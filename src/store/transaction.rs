//! Transaction - Queue writes and commit them atomically.
//!
//! ```ignore
//! store
//!     .transaction()
//!     .upsert(updated)
//!     .delete(stale_id)
//!     .commit()?;
//! ```

use crate::key::KeyCandidate;
use crate::record::{ClientRecord, RecordId};

use super::{ClientStore, CommitReceipt, StoreError, WriteOp};

/// Builder for a single atomic write against a [`ClientStore`].
pub struct Transaction<'a, S> {
    store: &'a S,
    ops: Vec<WriteOp>,
}

impl<'a, S: ClientStore> Transaction<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store, ops: vec![] }
    }

    /// Queue an insert; the store generates the key.
    pub fn insert(self, record: ClientRecord) -> Self {
        self.insert_with_key(record, KeyCandidate::Absent)
    }

    /// Queue an insert under an explicit key.
    pub fn insert_with_key(mut self, record: ClientRecord, key: KeyCandidate) -> Self {
        self.ops.push(WriteOp::Insert { record, key });
        self
    }

    pub fn upsert(mut self, record: ClientRecord) -> Self {
        self.ops.push(WriteOp::Upsert(record));
        self
    }

    pub fn delete(mut self, id: RecordId) -> Self {
        self.ops.push(WriteOp::Delete(id));
        self
    }

    /// Queue an already-built operation.
    pub fn push(mut self, op: WriteOp) -> Self {
        self.ops.push(op);
        self
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Commit every queued operation, or none of them.
    pub fn commit(self) -> Result<CommitReceipt, StoreError> {
        if self.ops.is_empty() {
            return Ok(CommitReceipt::default());
        }
        self.store.apply(&self.ops)
    }
}

/// Extension trait to start a transaction on any [`ClientStore`].
pub trait TransactionExt: ClientStore + Sized {
    fn transaction(&self) -> Transaction<'_, Self> {
        Transaction::new(self)
    }
}

impl<S: ClientStore> TransactionExt for S {}
