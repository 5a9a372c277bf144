//! Client-record manager.
//!
//! Contact records (name, email, phone) live in a local transactional
//! key-value store. A [`ClientBook`] ties the store to a validated form and a
//! [`ClientView`]: field events update per-field validation state, `submit`
//! decides between insert and update, and every committed change re-renders
//! the list.
//!
//! ```
//! use client_book::{BookConfig, BufferView, ClientBook, FieldName, SaveOutcome};
//!
//! let mut book = ClientBook::open(BookConfig::default(), BufferView::new());
//! book.input(FieldName::Name, "Ann Lee");
//! book.input(FieldName::Email, "ann@x.com");
//! book.input(FieldName::Phone, "5551234567");
//! assert!(book.view().submit_enabled());
//!
//! let SaveOutcome::Inserted(id) = book.submit().unwrap() else { unreachable!() };
//! assert_eq!(book.view().rows()[0].id, id);
//! ```

mod book;
mod config;
mod error;
mod format;
mod form;
mod key;
mod reconcile;
mod record;
mod store;
mod validate;
mod view;

pub use book::{ClientBook, SaveOutcome};
pub use config::{BookConfig, ConfigError, StoreConfig};
pub use error::ClientError;
pub use format::{format_phone, PHONE_DIGITS};
pub use form::{ClientForm, EditState, FieldEvent, FieldState, FieldStatus, Marker};
pub use key::{is_valid_key, KeyCandidate};
pub use reconcile::{reconcile, Candidate};
pub use record::{ClientRecord, RecordId};
pub use store::{
    client_schema, ClientStore, CollectionSchema, CommitReceipt, InMemoryClientStore, IndexSpec,
    SchemaBuilder, StoreError, Transaction, TransactionExt, WriteOp, CLIENTS,
};
pub use validate::{
    is_field_valid, is_named_field_valid, valid_email, valid_name, valid_phone, FieldName,
};
#[cfg(feature = "emitter")]
pub use view::EmitterView;
pub use view::{
    escape_html, BufferView, ClientRow, ClientView, LogView, Notice, NoticeKind, RowAction,
};

/// Event names broadcast by [`EmitterView`].
#[cfg(feature = "emitter")]
pub mod events {
    pub use crate::view::{NOTICE, RENDERED, SUBMIT_ENABLED};
}

// Re-export the EventEmitter so callers can build an EmitterView around their own
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
