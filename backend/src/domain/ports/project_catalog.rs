//! Driving port for the project catalog.

use async_trait::async_trait;

use crate::domain::{Error, Identity, IdentityId, Project, ProjectDraft, ProjectListing, ProjectSummary};

/// Use-case port for creating and listing showcase projects.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectCatalog: Send + Sync {
    /// Create a project owned by `owner`.
    async fn create(&self, owner: &Identity, draft: ProjectDraft) -> Result<Project, Error>;

    /// The caller's own projects, newest created first.
    async fn list_mine(&self, owner: &IdentityId) -> Result<Vec<Project>, Error>;

    /// Public summaries across all owners, most recently updated first.
    async fn list_public(&self) -> Result<Vec<ProjectSummary>, Error>;

    /// Reduced records across all owners, most recently updated first.
    async fn list_all(&self) -> Result<Vec<ProjectListing>, Error>;
}
