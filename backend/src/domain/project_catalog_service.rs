//! Project catalog service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::username_registry_service::map_user_repository_error;
use crate::domain::ports::{ProjectCatalog, ProjectRepository, ProjectRepositoryError, UserRepository};
use crate::domain::{
    Error, Identity, IdentityId, Project, ProjectDraft, ProjectListing, ProjectOwner,
    ProjectSummary, suffixed_slug,
};

/// Project catalog backed by project and user repositories.
#[derive(Clone)]
pub struct ProjectCatalogService<P, U> {
    projects: Arc<P>,
    users: Arc<U>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl<P, U> ProjectCatalogService<P, U> {
    /// Create a new service.
    pub fn new(projects: Arc<P>, users: Arc<U>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            projects,
            users,
            clock,
        }
    }
}

pub(crate) fn map_project_repository_error(error: ProjectRepositoryError) -> Error {
    match error {
        ProjectRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("project repository unavailable: {message}"))
        }
        ProjectRepositoryError::Query { message } => {
            Error::internal(format!("project repository error: {message}"))
        }
        ProjectRepositoryError::Conflict { message } => {
            Error::conflict(format!("project already exists: {message}"))
        }
    }
}

#[async_trait]
impl<P, U> ProjectCatalog for ProjectCatalogService<P, U>
where
    P: ProjectRepository,
    U: UserRepository,
{
    async fn create(&self, owner: &Identity, draft: ProjectDraft) -> Result<Project, Error> {
        let user = self
            .users
            .find_by_id(owner.id())
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found("User not found"))?;

        let now = self.clock.utc();
        let slug = suffixed_slug(draft.name(), now.timestamp_millis());
        let project_owner = ProjectOwner {
            id: user.id,
            username: user.username.map(String::from),
            email: owner.email().to_owned(),
        };
        let project = Project::from_draft(draft, project_owner, slug, now);
        self.projects
            .insert(&project)
            .await
            .map_err(map_project_repository_error)?;
        info!(project_id = %project.id, slug = %project.slug, "project created");
        Ok(project)
    }

    async fn list_mine(&self, owner: &IdentityId) -> Result<Vec<Project>, Error> {
        self.projects
            .list_by_owner(owner)
            .await
            .map_err(map_project_repository_error)
    }

    async fn list_public(&self) -> Result<Vec<ProjectSummary>, Error> {
        let projects = self
            .projects
            .list_all()
            .await
            .map_err(map_project_repository_error)?;
        Ok(projects.into_iter().map(ProjectSummary::from).collect())
    }

    async fn list_all(&self) -> Result<Vec<ProjectListing>, Error> {
        let projects = self
            .projects
            .list_all()
            .await
            .map_err(map_project_repository_error)?;
        Ok(projects.into_iter().map(ProjectListing::from).collect())
    }
}
