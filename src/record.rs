use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validate::FieldName;

/// Store-generated primary key of a client record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// Largest key the generator hands out. Every key up to it survives a
    /// round trip through `f64`.
    pub const MAX: RecordId = RecordId(1 << 53);

    pub const fn new(value: u64) -> Self {
        RecordId(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Interpret a raw numeric key, as read back from a row trigger.
    ///
    /// Only finite, whole, non-negative values up to [`RecordId::MAX`] are
    /// keys.
    pub fn from_number(value: f64) -> Option<Self> {
        if !value.is_finite() || value.fract() != 0.0 || value < 0.0 {
            return None;
        }
        if value > Self::MAX.0 as f64 {
            return None;
        }
        Some(RecordId(value as u64))
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        RecordId(value)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A contact record as persisted in the `clients` collection.
///
/// `id` is `None` until the store assigns one on insert. Once assigned it is
/// carried unchanged through every update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ClientRecord {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        ClientRecord {
            id: None,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn field(&self, field: FieldName) -> &str {
        match field {
            FieldName::Name => &self.name,
            FieldName::Email => &self.email,
            FieldName::Phone => &self.phone,
        }
    }
}
