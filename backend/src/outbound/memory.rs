//! In-process repositories backed by `Mutex`-guarded maps.
//!
//! Used when no `database_url` is configured and by the integration tests.
//! They enforce the same uniqueness rules as the PostgreSQL schema so the
//! domain sees identical conflicts.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    ProjectRepository, ProjectRepositoryError, PublishShareRepository,
    PublishShareRepositoryError, TemplateRepository, TemplateRepositoryError, UserRepository,
    UserRepositoryError,
};
use crate::domain::{IdentityId, Project, PublishShare, Template, User, Username};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Users keyed by identity id.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<IdentityId, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<User>, UserRepositoryError> {
        Ok(lock(&self.users).get(id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(lock(&self.users)
            .values()
            .find(|user| user.username.as_ref() == Some(username))
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[IdentityId]) -> Result<Vec<User>, UserRepositoryError> {
        let users = lock(&self.users);
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn upsert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = lock(&self.users);
        if let Some(username) = user.username.as_ref() {
            let taken = users
                .values()
                .any(|other| other.id != user.id && other.username.as_ref() == Some(username));
            if taken {
                return Err(UserRepositoryError::conflict("users_username_key"));
            }
        }
        let created_at = users.get(&user.id).map_or(user.created_at, |u| u.created_at);
        users.insert(
            user.id.clone(),
            User {
                created_at,
                ..user.clone()
            },
        );
        Ok(())
    }
}

/// Projects in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProjectRepository {
    projects: Mutex<Vec<Project>>,
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut projects = lock(&self.projects);
        if projects.iter().any(|p| p.slug == project.slug) {
            return Err(ProjectRepositoryError::conflict("projects_slug_key"));
        }
        projects.push(project.clone());
        Ok(())
    }

    async fn list_by_owner(
        &self,
        owner: &IdentityId,
    ) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut owned: Vec<Project> = lock(&self.projects)
            .iter()
            .filter(|p| &p.user_id == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn list_all(&self) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut all = lock(&self.projects).clone();
        all.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(all)
    }
}

/// Templates keyed by slug.
#[derive(Debug, Default)]
pub struct InMemoryTemplateRepository {
    templates: Mutex<HashMap<String, Template>>,
}

impl InMemoryTemplateRepository {
    fn sorted(mut templates: Vec<Template>) -> Vec<Template> {
        templates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        templates
    }
}

#[async_trait]
impl TemplateRepository for InMemoryTemplateRepository {
    async fn insert(&self, template: &Template) -> Result<(), TemplateRepositoryError> {
        let mut templates = lock(&self.templates);
        if templates.contains_key(&template.slug) {
            return Err(TemplateRepositoryError::conflict("templates_slug_key"));
        }
        templates.insert(template.slug.clone(), template.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Template>, TemplateRepositoryError> {
        Ok(Self::sorted(lock(&self.templates).values().cloned().collect()))
    }

    async fn list_by_owner(
        &self,
        owner: &IdentityId,
    ) -> Result<Vec<Template>, TemplateRepositoryError> {
        Ok(Self::sorted(
            lock(&self.templates)
                .values()
                .filter(|t| &t.user_id == owner)
                .cloned()
                .collect(),
        ))
    }

    async fn record_view(&self, slug: &str) -> Result<Option<Template>, TemplateRepositoryError> {
        let mut templates = lock(&self.templates);
        Ok(templates.get_mut(slug).map(|template| {
            template.views = template.views.saturating_add(1);
            template.clone()
        }))
    }
}

/// Publish shares keyed by share id.
///
/// Shares are staged by the external IDE, so this adapter exposes
/// [`InMemoryPublishShareRepository::stage`] for seeding.
#[derive(Debug, Default)]
pub struct InMemoryPublishShareRepository {
    shares: Mutex<HashMap<String, PublishShare>>,
}

impl InMemoryPublishShareRepository {
    pub fn stage(&self, share: PublishShare) {
        lock(&self.shares).insert(share.share_id.clone(), share);
    }
}

#[async_trait]
impl PublishShareRepository for InMemoryPublishShareRepository {
    async fn find_by_share_id(
        &self,
        share_id: &str,
    ) -> Result<Option<PublishShare>, PublishShareRepositoryError> {
        Ok(lock(&self.shares).get(share_id).cloned())
    }
}
