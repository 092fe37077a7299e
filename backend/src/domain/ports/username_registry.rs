//! Driving port for username registration.
//!
//! Inbound adapters (the setup endpoint and the access gate) depend on this
//! port rather than on the repository so the first-run and conflict rules
//! live in one place.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Error, Identity, IdentityId, User, Username};

/// Outcome of a registration check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsernameStatus {
    pub has_username: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl UsernameStatus {
    /// Status for an identity that has not claimed a handle.
    pub fn unregistered(user: Option<User>) -> Self {
        Self {
            has_username: false,
            user,
        }
    }

    /// Status for a registered user.
    pub fn registered(user: User) -> Self {
        Self {
            has_username: true,
            user: Some(user),
        }
    }
}

/// Use-case port for checking and claiming usernames.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsernameRegistry: Send + Sync {
    /// Report whether `id` has claimed a username.
    ///
    /// An unprovisioned user table is reported as "no username".
    async fn check(&self, id: &IdentityId) -> Result<UsernameStatus, Error>;

    /// Associate `username` with the caller, creating their record if needed.
    async fn claim(&self, identity: &Identity, username: Username) -> Result<User, Error>;
}
