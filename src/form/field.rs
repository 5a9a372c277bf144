use serde::{Deserialize, Serialize};

use crate::format::format_phone;
use crate::validate::{is_field_valid, FieldName};

/// Validation state of one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldStatus {
    Untouched,
    TouchedValid,
    TouchedInvalid,
}

/// What the input shows next to its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    Neutral,
    Valid,
    Invalid,
}

/// A user interaction with an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// Typed input; carries the whole new value.
    Input(String),
    /// Pasted text; carries the whole resulting value.
    Paste(String),
    /// Focus left the input without changing it.
    Blur,
}

/// One form input: its raw value and whether the user has interacted with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    name: FieldName,
    raw_value: String,
    touched: bool,
}

impl FieldState {
    pub fn new(name: FieldName) -> Self {
        Self {
            name,
            raw_value: String::new(),
            touched: false,
        }
    }

    pub fn name(&self) -> FieldName {
        self.name
    }

    pub fn value(&self) -> &str {
        &self.raw_value
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Validity of the current value, regardless of touched state.
    pub fn is_valid(&self) -> bool {
        is_field_valid(self.name, &self.raw_value)
    }

    pub fn status(&self) -> FieldStatus {
        match (self.touched, self.is_valid()) {
            (false, _) => FieldStatus::Untouched,
            (true, true) => FieldStatus::TouchedValid,
            (true, false) => FieldStatus::TouchedInvalid,
        }
    }

    /// Display projection. An untouched field stays neutral unless the
    /// form is editing an existing record.
    pub fn marker(&self, edit_mode: bool) -> Marker {
        if !self.touched && !edit_mode {
            return Marker::Neutral;
        }
        if self.is_valid() {
            Marker::Valid
        } else {
            Marker::Invalid
        }
    }

    /// Apply a user event. Any event marks the field touched.
    pub fn apply(&mut self, event: FieldEvent) -> FieldStatus {
        match event {
            FieldEvent::Input(value) | FieldEvent::Paste(value) => self.set_value(&value),
            FieldEvent::Blur => {}
        }
        self.touched = true;
        self.status()
    }

    /// Replace the value without touching the field. Phone input is
    /// canonicalized so validation always sees formatted text.
    pub fn set_value(&mut self, value: &str) {
        self.raw_value = match self.name {
            FieldName::Phone => format_phone(value),
            _ => value.to_string(),
        };
    }

    pub fn touch(&mut self) {
        self.touched = true;
    }

    pub fn reset(&mut self) {
        self.raw_value.clear();
        self.touched = false;
    }
}
