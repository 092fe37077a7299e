//! Community read models: leaderboard, activity chart, and profiles.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Datelike;
use mockable::Clock;

use super::project_catalog_service::map_project_repository_error;
use super::template_catalog_service::map_template_repository_error;
use super::username_registry_service::map_user_repository_error;
use crate::domain::ports::{CommunityQuery, ProjectRepository, TemplateRepository, UserRepository};
use crate::domain::{
    Error, IdentityId, Leaderboard, MonthlyActivity, OwnProfile, PublicProfile, TemplateSummary,
    Username, monthly_activity,
};

/// Computes community views from the project, user, and template stores.
#[derive(Clone)]
pub struct CommunityService<P, U, T> {
    projects: Arc<P>,
    users: Arc<U>,
    templates: Arc<T>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl<P, U, T> CommunityService<P, U, T> {
    /// Create a new service.
    pub fn new(
        projects: Arc<P>,
        users: Arc<U>,
        templates: Arc<T>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            projects,
            users,
            templates,
            clock,
        }
    }
}

#[async_trait]
impl<P, U, T> CommunityQuery for CommunityService<P, U, T>
where
    P: ProjectRepository,
    U: UserRepository,
    T: TemplateRepository,
{
    async fn leaderboard(&self, limit: usize) -> Result<Leaderboard, Error> {
        let projects = self
            .projects
            .list_all()
            .await
            .map_err(map_project_repository_error)?;
        Ok(Leaderboard::rank(&projects, limit, self.clock.utc()))
    }

    async fn monthly_activity(&self) -> Result<Vec<MonthlyActivity>, Error> {
        let projects = self
            .projects
            .list_all()
            .await
            .map_err(map_project_repository_error)?;
        Ok(monthly_activity(&projects, self.clock.utc().year()))
    }

    async fn public_profile(&self, username: &Username) -> Result<PublicProfile, Error> {
        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found("User not found"))?;
        let projects = self
            .projects
            .list_by_owner(&user.id)
            .await
            .map_err(map_project_repository_error)?;
        Ok(PublicProfile::new(
            &user,
            username.as_str().to_owned(),
            projects,
        ))
    }

    async fn own_profile(&self, id: &IdentityId) -> Result<OwnProfile, Error> {
        let user = self
            .users
            .find_by_id(id)
            .await
            .map_err(map_user_repository_error)?;
        let projects = self
            .projects
            .list_by_owner(id)
            .await
            .map_err(map_project_repository_error)?;
        let templates = self
            .templates
            .list_by_owner(id)
            .await
            .map_err(map_template_repository_error)?;
        let author = user
            .as_ref()
            .map_or(super::ANONYMOUS_AUTHOR, |user| user.author_name())
            .to_owned();
        let templates = templates
            .into_iter()
            .map(|template| TemplateSummary::new(template, author.clone()))
            .collect();
        Ok(OwnProfile {
            user,
            projects,
            templates,
        })
    }
}
