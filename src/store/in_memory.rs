//! InMemoryClientStore - BTreeMap-backed client store.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::key::KeyCandidate;
use crate::record::{ClientRecord, RecordId};
use crate::validate::FieldName;

use super::schema::{CollectionSchema, SchemaBuilder, CLIENTS};
use super::{ClientStore, CommitReceipt, StoreError, WriteOp};

/// Records plus the key generator's current value.
#[derive(Clone, Default)]
struct Collection {
    records: BTreeMap<RecordId, Vec<u8>>,
    /// Last generated or explicitly used numeric key.
    current_key: u64,
}

impl Collection {
    fn decode(bytes: &[u8]) -> Result<ClientRecord, StoreError> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Serde(e.to_string()))
    }

    fn put(&mut self, record: &ClientRecord, id: RecordId) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(record).map_err(|e| StoreError::Serde(e.to_string()))?;
        self.records.insert(id, bytes);
        self.current_key = self.current_key.max(id.get());
        Ok(())
    }

    fn matching(&self, field: FieldName, value: &str) -> Result<Vec<ClientRecord>, StoreError> {
        let mut found = Vec::new();
        for bytes in self.records.values() {
            let record = Self::decode(bytes)?;
            if record.field(field) == value {
                found.push(record);
            }
        }
        Ok(found)
    }
}

/// In-memory client store.
///
/// Records are kept JSON-encoded, ordered by key. Clone-friendly via Arc;
/// clones share storage.
#[derive(Clone)]
pub struct InMemoryClientStore {
    name: String,
    version: u32,
    schema: Arc<CollectionSchema>,
    storage: Arc<RwLock<Collection>>,
}

impl InMemoryClientStore {
    /// Open a fresh store, running `upgrade` to declare its schema.
    ///
    /// Version 0 is never valid. The upgrade must create the
    /// [`CLIENTS`] collection.
    pub fn open<F>(config: &StoreConfig, upgrade: F) -> Result<Self, StoreError>
    where
        F: FnOnce(&mut SchemaBuilder),
    {
        if config.version == 0 {
            return Err(StoreError::InvalidVersion(config.version));
        }

        let mut builder = SchemaBuilder::new(0);
        upgrade(&mut builder);
        let schema = builder
            .take(CLIENTS)
            .ok_or_else(|| StoreError::MissingCollection(CLIENTS.to_string()))?;

        info!(store = %config.name, version = config.version, "opened client store");

        Ok(Self {
            name: config.name.clone(),
            version: config.version,
            schema: Arc::new(schema),
            storage: Arc::new(RwLock::new(Collection::default())),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn schema(&self) -> &CollectionSchema {
        &self.schema
    }

    /// Resolve the key an insert will be stored under.
    fn insert_key(
        &self,
        staged: &mut Collection,
        record: &ClientRecord,
        key: &KeyCandidate,
    ) -> Result<RecordId, StoreError> {
        if !key.is_blank() {
            return key.as_record_id().ok_or_else(|| StoreError::UnsupportedKey {
                collection: self.schema.name.clone(),
                key: key.to_string(),
            });
        }
        if let Some(id) = record.id {
            return self.bounded(id);
        }
        if !self.schema.auto_increment {
            return Err(StoreError::MissingKey(self.schema.name.clone()));
        }
        let next = staged.current_key + 1;
        if next > RecordId::MAX.get() {
            return Err(StoreError::Storage("key generator exhausted".into()));
        }
        staged.current_key = next;
        Ok(RecordId::new(next))
    }

    /// Keys past [`RecordId::MAX`] cannot be read back from a row trigger.
    fn bounded(&self, id: RecordId) -> Result<RecordId, StoreError> {
        if id > RecordId::MAX {
            return Err(StoreError::UnsupportedKey {
                collection: self.schema.name.clone(),
                key: id.to_string(),
            });
        }
        Ok(id)
    }

    /// Reject `record` if any unique index already maps its value to a
    /// different key.
    fn check_unique(
        &self,
        staged: &Collection,
        record: &ClientRecord,
        id: RecordId,
    ) -> Result<(), StoreError> {
        for index in self.schema.unique_indexes() {
            let value = record.field(index.field);
            let clash = staged
                .matching(index.field, value)?
                .into_iter()
                .any(|other| other.id != Some(id));
            if clash {
                return Err(StoreError::ConstraintViolation {
                    index: index.name.clone(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    fn apply_op(
        &self,
        staged: &mut Collection,
        op: &WriteOp,
        receipt: &mut CommitReceipt,
    ) -> Result<(), StoreError> {
        match op {
            WriteOp::Insert { record, key } => {
                let id = self.insert_key(staged, record, key)?;
                if staged.records.contains_key(&id) {
                    return Err(StoreError::KeyExists(id));
                }
                let stored = record.clone().with_id(id);
                self.check_unique(staged, &stored, id)?;
                staged.put(&stored, id)?;
                receipt.inserted.push(id);
            }
            WriteOp::Upsert(record) => {
                let id = record
                    .id
                    .ok_or_else(|| StoreError::MissingKey(self.schema.name.clone()))?;
                let id = self.bounded(id)?;
                self.check_unique(staged, record, id)?;
                staged.put(record, id)?;
                receipt.updated.push(id);
            }
            WriteOp::Delete(id) => {
                staged.records.remove(id);
                receipt.deleted.push(*id);
            }
        }
        Ok(())
    }
}

impl ClientStore for InMemoryClientStore {
    fn get_all(&self) -> Result<Vec<ClientRecord>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        storage.records.values().map(|bytes| Collection::decode(bytes)).collect()
    }

    fn get(&self, id: RecordId) -> Result<Option<ClientRecord>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        storage
            .records
            .get(&id)
            .map(|bytes| Collection::decode(bytes))
            .transpose()
    }

    fn find_by_index(
        &self,
        field: FieldName,
        value: &str,
    ) -> Result<Vec<ClientRecord>, StoreError> {
        if self.schema.index_on(field).is_none() {
            return Err(StoreError::MissingIndex(field.to_string()));
        }
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        storage.matching(field, value)
    }

    fn apply(&self, ops: &[WriteOp]) -> Result<CommitReceipt, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        // Work on a copy so a failing op leaves nothing behind.
        let mut staged = storage.clone();
        let mut receipt = CommitReceipt::default();
        for op in ops {
            self.apply_op(&mut staged, op, &mut receipt)?;
        }

        *storage = staged;
        debug!(
            inserted = receipt.inserted.len(),
            updated = receipt.updated.len(),
            deleted = receipt.deleted.len(),
            "transaction committed"
        );
        Ok(receipt)
    }
}
