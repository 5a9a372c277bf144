//! Field validators.
//!
//! Pure predicates over raw field values. The form state machine and the
//! submit gate both go through [`is_field_valid`], so there is exactly one
//! definition of what a valid name, email, or phone looks like.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}-[0-9]{3}-[0-9]{4}$").expect("phone pattern compiles"));

/// The inputs of the client form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Name,
    Email,
    Phone,
}

impl FieldName {
    /// All form fields in display order.
    pub const ALL: [FieldName; 3] = [FieldName::Name, FieldName::Email, FieldName::Phone];

    /// Resolve an input's declared name (`"name"`, `"email"`, `"phone"`).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "name" => Some(FieldName::Name),
            "email" => Some(FieldName::Email),
            "phone" => Some(FieldName::Phone),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Name => "name",
            FieldName::Email => "email",
            FieldName::Phone => "phone",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// At least two characters once surrounding whitespace is trimmed.
pub fn valid_name(value: &str) -> bool {
    value.trim().chars().count() >= 2
}

/// `local@domain.tld`, no whitespace anywhere and a dot after the `@`.
pub fn valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Canonical `DDD-DDD-DDDD` only; run input through
/// [`format_phone`](crate::format_phone) first.
pub fn valid_phone(value: &str) -> bool {
    PHONE.is_match(value)
}

pub fn is_field_valid(field: FieldName, value: &str) -> bool {
    match field {
        FieldName::Name => valid_name(value),
        FieldName::Email => valid_email(value),
        FieldName::Phone => valid_phone(value),
    }
}

/// Like [`is_field_valid`] but keyed by the raw input name. Unknown names
/// never validate.
pub fn is_named_field_valid(name: &str, value: &str) -> bool {
    FieldName::parse(name).is_some_and(|field| is_field_valid(field, value))
}
