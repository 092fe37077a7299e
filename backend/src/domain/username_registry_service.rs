//! Username registry service.
//!
//! Claims are upserts keyed by identity so a retried claim never forks the
//! identity-to-record mapping. The existence check is a fast path only; the
//! storage layer's unique constraint is what settles concurrent claims.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{UserRepository, UserRepositoryError, UsernameRegistry, UsernameStatus};
use crate::domain::{Error, Identity, IdentityId, User, Username};

/// Message returned when a handle belongs to someone else.
pub const USERNAME_TAKEN: &str = "Username already taken";

/// Username registry backed by a [`UserRepository`].
#[derive(Clone)]
pub struct UsernameRegistryService<U> {
    users: Arc<U>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl<U> UsernameRegistryService<U> {
    /// Create a new service over the given repository and clock.
    pub fn new(users: Arc<U>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { users, clock }
    }
}

pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::Conflict { .. } => taken(),
        UserRepositoryError::MissingSchema { relation } => {
            Error::internal(format!("relation {relation} does not exist"))
        }
    }
}

fn taken() -> Error {
    Error::conflict(USERNAME_TAKEN).with_details(json!({
        "field": "username",
        "code": "username_taken",
    }))
}

#[async_trait]
impl<U> UsernameRegistry for UsernameRegistryService<U>
where
    U: UserRepository,
{
    async fn check(&self, id: &IdentityId) -> Result<UsernameStatus, Error> {
        match self.users.find_by_id(id).await {
            Ok(Some(user)) if user.is_registered() => Ok(UsernameStatus::registered(user)),
            Ok(user) => Ok(UsernameStatus::unregistered(user)),
            Err(UserRepositoryError::MissingSchema { relation }) => {
                debug!(%relation, "user table not provisioned; reporting no username");
                Ok(UsernameStatus::unregistered(None))
            }
            Err(error) => Err(map_user_repository_error(error)),
        }
    }

    async fn claim(&self, identity: &Identity, username: Username) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_id(identity.id())
            .await
            .map_err(map_user_repository_error)?;

        if let Some(current) = existing.as_ref().and_then(|user| user.username.as_ref()) {
            if current == &username {
                return existing.ok_or_else(|| Error::internal("user record vanished"));
            }
            return Err(Error::conflict("Username cannot be changed once set").with_details(
                json!({ "field": "username", "code": "username_immutable" }),
            ));
        }

        let holder = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_repository_error)?;
        if holder.is_some_and(|user| &user.id != identity.id()) {
            return Err(taken());
        }

        let now = self.clock.utc();
        let user = match existing {
            Some(current) => User {
                username: Some(username),
                email: identity.email().to_owned(),
                updated_at: now,
                ..current
            },
            None => User {
                id: identity.id().clone(),
                username: Some(username),
                email: identity.email().to_owned(),
                display_name: identity.display_name().map(str::to_owned),
                created_at: now,
                updated_at: now,
            },
        };
        self.users
            .upsert(&user)
            .await
            .map_err(map_user_repository_error)?;
        info!(user_id = %user.id, "username claimed");
        Ok(user)
    }
}

#[cfg(test)]
#[path = "username_registry_service_tests.rs"]
mod tests;
