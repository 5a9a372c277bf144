//! Save-path decisions: insert or update, and whether the key allows it.
//!
//! [`reconcile`] runs before any store contact. When it fails, the store is
//! never touched.

use tracing::debug;

use crate::error::ClientError;
use crate::form::{ClientForm, EditState};
use crate::key::{is_valid_key, KeyCandidate};
use crate::record::{ClientRecord, RecordId};
use crate::store::WriteOp;
use crate::validate::{is_field_valid, FieldName};

/// A record about to be saved, plus any explicit key attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    record: ClientRecord,
    key: KeyCandidate,
}

impl Candidate {
    /// Split a record into its fields and its key property.
    pub fn new(mut record: ClientRecord) -> Self {
        let key = record
            .id
            .take()
            .map(KeyCandidate::from)
            .unwrap_or_default();
        Self { record, key }
    }

    pub fn from_form(form: &ClientForm) -> Self {
        Self::new(form.candidate())
    }

    pub fn with_key(mut self, key: KeyCandidate) -> Self {
        self.key = key;
        self
    }

    pub fn record(&self) -> &ClientRecord {
        &self.record
    }

    pub fn key(&self) -> &KeyCandidate {
        &self.key
    }

    /// Fields whose value fails its validator.
    pub fn invalid_fields(&self) -> Vec<FieldName> {
        FieldName::ALL
            .into_iter()
            .filter(|field| !is_field_valid(*field, self.record.field(*field)))
            .collect()
    }
}

/// Decide the write for `candidate` given the form's edit state.
///
/// Every field must validate first. In edit mode the editing id must be a
/// whole, finite number; it becomes the record's key and the write is an
/// upsert. Otherwise the write is an insert: a blank explicit key is dropped
/// so the store generates one, any other key must pass [`is_valid_key`].
pub fn reconcile(candidate: Candidate, edit: &EditState) -> Result<WriteOp, ClientError> {
    let fields = candidate.invalid_fields();
    if !fields.is_empty() {
        return Err(ClientError::InvalidForm { fields });
    }
    let Candidate { mut record, key } = candidate;

    if let Some(raw) = edit.editing_id() {
        let id = RecordId::from_number(raw).ok_or(ClientError::InvalidEditKey { raw })?;
        debug!(%id, "updating client");
        record.id = Some(id);
        return Ok(WriteOp::Upsert(record));
    }

    if key.is_blank() {
        if key != KeyCandidate::Absent {
            debug!(%key, "dropping blank key before insert");
        }
        debug!("adding new client");
        return Ok(WriteOp::Insert {
            record,
            key: KeyCandidate::Absent,
        });
    }

    if !is_valid_key(&key) {
        return Err(ClientError::InvalidInsertKey { key });
    }
    debug!(%key, "adding new client with explicit key");
    Ok(WriteOp::Insert { record, key })
}
