//! Registered user data model.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::IdentityId;

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 32;

/// Validation errors returned by [`Username::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsernameValidationError {
    /// Fewer than [`USERNAME_MIN`] characters.
    #[error("Username must be at least {min} characters")]
    TooShort { min: usize },
    /// More than [`USERNAME_MAX`] characters.
    #[error("Username must be at most {max} characters")]
    TooLong { max: usize },
    /// Contains characters outside the permitted class.
    #[error("Username may only contain lowercase letters, numbers, hyphens, and underscores")]
    InvalidCharacters,
}

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        Regex::new("^[a-z0-9_-]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Unique public handle chosen by a user.
///
/// # Examples
/// ```
/// use showcase::domain::Username;
///
/// assert!(Username::new("ada_l").is_ok());
/// assert!(Username::new("Ada").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UsernameValidationError> {
        let username = username.into();
        let length = username.chars().count();
        if length < USERNAME_MIN {
            return Err(UsernameValidationError::TooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UsernameValidationError::TooLong { max: USERNAME_MAX });
        }
        if !username_regex().is_match(&username) {
            return Err(UsernameValidationError::InvalidCharacters);
        }
        Ok(Self(username))
    }

    /// Borrow the handle as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Application user record keyed by provider identity.
///
/// ## Invariants
/// - A user without a username is "unregistered" and is redirected by the
///   access gate until one is claimed.
/// - Once set, `username` never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: IdentityId,
    pub username: Option<Username>,
    pub email: String,
    #[serde(rename = "name")]
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether the user has completed username registration.
    pub fn is_registered(&self) -> bool {
        self.username.is_some()
    }

    /// Handle shown as the author of published content.
    ///
    /// Prefers the display name, then the username, then `"Anonymous"`.
    pub fn author_name(&self) -> &str {
        author_name(self.display_name.as_deref(), self.username.as_ref())
    }
}

/// Fallback author label when neither a display name nor a username exists.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Resolve an author label from optional profile fields.
pub fn author_name<'a>(display_name: Option<&'a str>, username: Option<&'a Username>) -> &'a str {
    display_name
        .filter(|name| !name.trim().is_empty())
        .or_else(|| username.map(Username::as_str))
        .unwrap_or(ANONYMOUS_AUTHOR)
}
