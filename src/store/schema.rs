//! Collection and index declarations, built by the upgrade callback passed to
//! [`InMemoryClientStore::open`](super::InMemoryClientStore::open).

use crate::validate::FieldName;

/// Name of the collection holding client records.
pub const CLIENTS: &str = "clients";

/// A secondary lookup over one record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    pub name: String,
    pub field: FieldName,
    pub unique: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSchema {
    pub name: String,
    pub key_path: String,
    /// Keys are generated from a monotonically increasing counter.
    pub auto_increment: bool,
    pub indexes: Vec<IndexSpec>,
}

impl CollectionSchema {
    pub fn create_index(
        &mut self,
        name: impl Into<String>,
        field: FieldName,
        unique: bool,
    ) -> &mut Self {
        self.indexes.push(IndexSpec {
            name: name.into(),
            field,
            unique,
        });
        self
    }

    pub fn index_on(&self, field: FieldName) -> Option<&IndexSpec> {
        self.indexes.iter().find(|index| index.field == field)
    }

    pub fn unique_indexes(&self) -> impl Iterator<Item = &IndexSpec> {
        self.indexes.iter().filter(|index| index.unique)
    }
}

/// Mutable schema handed to the upgrade callback.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    old_version: u32,
    collections: Vec<CollectionSchema>,
}

impl SchemaBuilder {
    pub(crate) fn new(old_version: u32) -> Self {
        Self {
            old_version,
            collections: Vec::new(),
        }
    }

    /// Version the store had before this upgrade; 0 for a fresh store.
    pub fn old_version(&self) -> u32 {
        self.old_version
    }

    pub fn contains(&self, name: &str) -> bool {
        self.collections.iter().any(|c| c.name == name)
    }

    pub fn create_collection(
        &mut self,
        name: impl Into<String>,
        key_path: impl Into<String>,
        auto_increment: bool,
    ) -> &mut CollectionSchema {
        self.collections.push(CollectionSchema {
            name: name.into(),
            key_path: key_path.into(),
            auto_increment,
            indexes: Vec::new(),
        });
        let last = self.collections.len() - 1;
        &mut self.collections[last]
    }

    pub(crate) fn take(mut self, name: &str) -> Option<CollectionSchema> {
        let pos = self.collections.iter().position(|c| c.name == name)?;
        Some(self.collections.swap_remove(pos))
    }
}

/// Standard upgrade for the client store.
///
/// Email is the only unique lookup. Phone stays non-unique: two clients may
/// share a household or office line.
pub fn client_schema(schema: &mut SchemaBuilder) {
    if schema.contains(CLIENTS) {
        return;
    }
    schema
        .create_collection(CLIENTS, "id", true)
        .create_index("name", FieldName::Name, false)
        .create_index("email", FieldName::Email, true)
        .create_index("phone", FieldName::Phone, false);
}
