//! Authenticated caller identity.
//!
//! Identities are issued by the external OAuth provider. The identifier is an
//! opaque string owned by that provider; this system never mints one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum accepted length for an identity identifier.
pub const IDENTITY_ID_MAX: usize = 255;

/// Validation errors raised when constructing identity values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityValidationError {
    /// The identifier was empty.
    #[error("identity id must not be empty")]
    EmptyId,
    /// The identifier carried surrounding whitespace.
    #[error("identity id must not contain surrounding whitespace")]
    UntrimmedId,
    /// The identifier exceeded [`IDENTITY_ID_MAX`].
    #[error("identity id must be at most {max} characters")]
    IdTooLong { max: usize },
}

/// Opaque identifier supplied by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdentityId(String);

impl IdentityId {
    /// Validate and construct an [`IdentityId`].
    pub fn new(id: impl Into<String>) -> Result<Self, IdentityValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(IdentityValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(IdentityValidationError::UntrimmedId);
        }
        if id.chars().count() > IDENTITY_ID_MAX {
            return Err(IdentityValidationError::IdTooLong {
                max: IDENTITY_ID_MAX,
            });
        }
        Ok(Self(id))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for IdentityId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<IdentityId> for String {
    fn from(value: IdentityId) -> Self {
        value.0
    }
}

impl TryFrom<String> for IdentityId {
    type Error = IdentityValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Resolved identity of the authenticated caller.
///
/// ## Invariants
/// - `display_name`, when present, is non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    id: IdentityId,
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
}

impl Identity {
    /// Build an identity, discarding a blank display name.
    pub fn new(id: IdentityId, email: impl Into<String>, display_name: Option<String>) -> Self {
        let display_name = display_name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty());
        Self {
            id,
            email: email.into(),
            display_name,
        }
    }

    /// Provider-issued identifier.
    pub fn id(&self) -> &IdentityId {
        &self.id
    }

    /// Email address reported by the provider.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Display name explicitly supplied by the provider, if any.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Name to greet the caller with: the provider display name, otherwise the
    /// local part of the email address.
    ///
    /// # Examples
    /// ```
    /// use showcase::domain::{Identity, IdentityId};
    ///
    /// let id = IdentityId::new("user-1").expect("valid id");
    /// let identity = Identity::new(id, "ada@example.com", None);
    /// assert_eq!(identity.derived_name(), "ada");
    /// ```
    pub fn derived_name(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) => name,
            None => self.email.split('@').next().unwrap_or_default(),
        }
    }
}
