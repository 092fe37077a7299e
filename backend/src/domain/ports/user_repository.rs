//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{IdentityId, User, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Conflict { message: String } => "user repository conflict: {message}",
        /// The backing table has not been provisioned yet.
        MissingSchema { relation: String } => "relation {relation} does not exist",
    }
}

/// Storage for registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by provider identity.
    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by their claimed handle.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch every user whose identity appears in `ids`; unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[IdentityId]) -> Result<Vec<User>, UserRepositoryError>;

    /// Insert or update a user keyed by identity.
    ///
    /// Implementations must enforce username uniqueness at the storage layer
    /// and report a violation as [`UserRepositoryError::Conflict`].
    async fn upsert(&self, user: &User) -> Result<(), UserRepositoryError>;
}
