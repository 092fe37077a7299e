//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies deserialise into DTOs with optional fields so a missing
//! field surfaces as a structured `400` rather than an opaque JSON error.

use serde_json::json;

use crate::domain::{Error, UsernameValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidUsername,
    InvalidTitle,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUsername => "invalid_username",
            Self::InvalidTitle => "invalid_title",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

/// Build a `400` carrying `{field, code}` details.
pub(crate) fn field_error(
    field: FieldName,
    code: ValidationCode,
    message: impl Into<String>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName, message: impl Into<String>) -> Error {
    field_error(field, ValidationCode::MissingField, message)
}

pub(crate) fn invalid_username_error(err: &UsernameValidationError) -> Error {
    field_error(
        FieldName::new("username"),
        ValidationCode::InvalidUsername,
        err.to_string(),
    )
}

/// Return the trimmed value, or a missing-field error when blank or absent.
pub(crate) fn require_text(
    value: Option<String>,
    field: FieldName,
    message: &str,
) -> Result<String, Error> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
        .ok_or_else(|| missing_field_error(field, message))
}
