//! Port for project persistence.

use async_trait::async_trait;

use crate::domain::{IdentityId, Project};

use super::define_port_error;

define_port_error! {
    /// Errors raised by project repository adapters.
    pub enum ProjectRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "project repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "project repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Conflict { message: String } => "project repository conflict: {message}",
    }
}

/// Storage for showcase projects.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Persist a new project.
    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError>;

    /// Projects owned by `owner`, newest created first.
    async fn list_by_owner(&self, owner: &IdentityId)
    -> Result<Vec<Project>, ProjectRepositoryError>;

    /// Every project, most recently updated first.
    async fn list_all(&self) -> Result<Vec<Project>, ProjectRepositoryError>;
}
