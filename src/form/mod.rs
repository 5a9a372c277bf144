//! Client form state.
//!
//! [`ClientForm`] owns one [`FieldState`] per input plus the [`EditState`]
//! saying whether the form is adding a record or updating one. Display
//! markers and the submit gate are both derived from it; nothing is stored
//! on the rendering side.

mod field;

use crate::record::{ClientRecord, RecordId};
use crate::validate::FieldName;

pub use field::{FieldEvent, FieldState, FieldStatus, Marker};

/// Which record, if any, the form is editing.
///
/// The id is kept as a raw number, the way row triggers hand it over, so a
/// malformed id survives until the save path checks it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EditState {
    editing_id: Option<f64>,
}

impl EditState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing(id: RecordId) -> Self {
        Self::from_raw(id.get() as f64)
    }

    pub fn from_raw(id: f64) -> Self {
        Self {
            editing_id: Some(id),
        }
    }

    /// Read an id from a text attribute. Empty text means not editing;
    /// unparseable text becomes NaN and is rejected on save.
    pub fn from_attribute(attr: &str) -> Self {
        let attr = attr.trim();
        if attr.is_empty() {
            return Self::default();
        }
        Self::from_raw(attr.parse().unwrap_or(f64::NAN))
    }

    pub fn editing_id(&self) -> Option<f64> {
        self.editing_id
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn clear(&mut self) {
        self.editing_id = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientForm {
    name: FieldState,
    email: FieldState,
    phone: FieldState,
    edit: EditState,
}

impl Default for ClientForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientForm {
    pub fn new() -> Self {
        Self {
            name: FieldState::new(FieldName::Name),
            email: FieldState::new(FieldName::Email),
            phone: FieldState::new(FieldName::Phone),
            edit: EditState::default(),
        }
    }

    /// A form whose inputs already carry values, e.g. restored by the
    /// browser. Non-empty fields count as touched so their state shows
    /// immediately.
    pub fn prefilled(name: &str, email: &str, phone: &str) -> Self {
        let mut form = Self::new();
        for (field, value) in [
            (FieldName::Name, name),
            (FieldName::Email, email),
            (FieldName::Phone, phone),
        ] {
            let state = form.field_mut(field);
            state.set_value(value);
            if !value.is_empty() {
                state.touch();
            }
        }
        form
    }

    pub fn field(&self, field: FieldName) -> &FieldState {
        match field {
            FieldName::Name => &self.name,
            FieldName::Email => &self.email,
            FieldName::Phone => &self.phone,
        }
    }

    fn field_mut(&mut self, field: FieldName) -> &mut FieldState {
        match field {
            FieldName::Name => &mut self.name,
            FieldName::Email => &mut self.email,
            FieldName::Phone => &mut self.phone,
        }
    }

    pub fn fields(&self) -> [&FieldState; 3] {
        [&self.name, &self.email, &self.phone]
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    pub fn set_edit_state(&mut self, edit: EditState) {
        self.edit = edit;
    }

    pub fn handle(&mut self, field: FieldName, event: FieldEvent) -> FieldStatus {
        self.field_mut(field).apply(event)
    }

    pub fn marker(&self, field: FieldName) -> Marker {
        self.field(field).marker(self.edit.is_editing())
    }

    /// Whether the submit control should be enabled: every field holds a
    /// valid value. Touched state plays no part.
    pub fn is_submittable(&self) -> bool {
        self.fields().iter().all(|field| field.is_valid())
    }

    /// Reveal validity of every field without waiting for user input.
    pub fn enter_edit_mode(&mut self) {
        for field in FieldName::ALL {
            self.field_mut(field).touch();
        }
    }

    /// Pre-populate the form from a stored record and switch to edit mode.
    pub fn load(&mut self, id: RecordId, record: &ClientRecord) {
        for field in FieldName::ALL {
            self.field_mut(field).set_value(record.field(field));
        }
        self.edit = EditState::editing(id);
        self.enter_edit_mode();
    }

    /// Candidate record from the current values, without a key.
    pub fn candidate(&self) -> ClientRecord {
        ClientRecord::new(self.name.value(), self.email.value(), self.phone.value())
    }

    /// Back to a blank, untouched form in add mode.
    pub fn reset(&mut self) {
        for field in FieldName::ALL {
            self.field_mut(field).reset();
        }
        self.edit.clear();
    }
}
