//! Dynamically-typed keys supplied by callers on insert.
//!
//! The store accepts only a restricted set of key shapes: numbers, strings,
//! dates and arrays. Anything structured is rejected up front so a bad key
//! never reaches a transaction.

use std::collections::BTreeMap;
use std::fmt;
use std::time::SystemTime;

use crate::record::RecordId;

/// A key value attached to an insert candidate.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum KeyCandidate {
    /// No key property at all.
    #[default]
    Absent,
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(SystemTime),
    Array(Vec<KeyCandidate>),
    Object(BTreeMap<String, KeyCandidate>),
}

impl KeyCandidate {
    /// Keys that carry no value and are dropped so the store can generate one.
    pub fn is_blank(&self) -> bool {
        match self {
            KeyCandidate::Absent | KeyCandidate::Null => true,
            KeyCandidate::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Whole non-negative numbers map onto the collection's generated keys.
    pub fn as_record_id(&self) -> Option<RecordId> {
        match self {
            KeyCandidate::Number(value) => RecordId::from_number(*value),
            _ => None,
        }
    }
}

impl From<RecordId> for KeyCandidate {
    fn from(id: RecordId) -> Self {
        KeyCandidate::Number(id.get() as f64)
    }
}

impl fmt::Display for KeyCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCandidate::Absent => f.write_str("<absent>"),
            KeyCandidate::Null => f.write_str("null"),
            KeyCandidate::Bool(value) => write!(f, "{}", value),
            KeyCandidate::Number(value) => write!(f, "{}", value),
            KeyCandidate::Text(text) => write!(f, "{:?}", text),
            KeyCandidate::Date(at) => write!(f, "date({:?})", at),
            KeyCandidate::Array(items) => write!(f, "array[{}]", items.len()),
            KeyCandidate::Object(fields) => write!(f, "object{{{} fields}}", fields.len()),
        }
    }
}

/// Whether `key` is a shape the store can index.
///
/// Finite numbers, non-empty strings, dates and non-empty arrays pass.
/// Objects, booleans and null do not.
pub fn is_valid_key(key: &KeyCandidate) -> bool {
    match key {
        KeyCandidate::Number(value) => value.is_finite(),
        KeyCandidate::Text(text) => !text.is_empty(),
        KeyCandidate::Date(_) => true,
        KeyCandidate::Array(items) => !items.is_empty(),
        KeyCandidate::Absent
        | KeyCandidate::Null
        | KeyCandidate::Bool(_)
        | KeyCandidate::Object(_) => false,
    }
}
