//! View collaborators.
//!
//! A [`ClientView`] receives everything the user sees: the rendered client
//! list, notices, and whether the submit control is enabled. Row triggers
//! come back into the book as [`RowAction`]s.

mod buffer;
#[cfg(feature = "emitter")]
mod emitter;
mod log;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::record::{ClientRecord, RecordId};

pub use buffer::BufferView;
#[cfg(feature = "emitter")]
pub use emitter::{EmitterView, NOTICE, RENDERED, SUBMIT_ENABLED};
pub use log::LogView;

/// Escape text for interpolation into HTML markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// One rendered line of the client list. Text is already HTML-escaped;
/// `id` feeds the row's edit and delete triggers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRow {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ClientRow {
    /// Rows exist only for stored records.
    pub fn from_record(record: &ClientRecord) -> Option<Self> {
        Some(Self {
            id: record.id?,
            name: escape_html(&record.name),
            email: escape_html(&record.email),
            phone: escape_html(&record.phone),
        })
    }

    pub fn edit(&self) -> RowAction {
        RowAction::Edit(self.id)
    }

    pub fn delete(&self) -> RowAction {
        RowAction::Delete(self.id)
    }
}

/// A row trigger fired by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit(RecordId),
    Delete(RecordId),
}

impl RowAction {
    /// Decode a trigger from its kind (`"edit"` or `"delete"`) and its
    /// `data-id` text.
    pub fn from_trigger(kind: &str, data_id: &str) -> Option<Self> {
        let id = RecordId::from_number(data_id.trim().parse().ok()?)?;
        match kind {
            "edit" => Some(RowAction::Edit(id)),
            "delete" => Some(RowAction::Delete(id)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// A user-visible message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    /// Hide the notice after this long; `None` keeps it until replaced.
    pub clear_after: Option<Duration>,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
            clear_after: None,
        }
    }

    pub fn success(message: impl Into<String>, clear_after: Duration) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
            clear_after: Some(clear_after),
        }
    }
}

/// Rendering collaborator of a [`ClientBook`](crate::ClientBook).
pub trait ClientView {
    /// Replace the list with `rows`.
    fn render(&mut self, rows: &[ClientRow]);

    fn notify(&mut self, notice: Notice);

    fn set_submit_enabled(&mut self, enabled: bool);
}
