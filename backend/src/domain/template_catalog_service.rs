//! Template catalog service, including the publish flow.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::ports::{
    PublishShareRepository, PublishShareRepositoryError, TemplateCatalog, TemplateRepository,
    TemplateRepositoryError, UserRepository,
};
use crate::domain::{
    ANONYMOUS_AUTHOR, Error, Identity, IdentityId, PublishDraft, SharePreview, Template,
    TemplateDetail, TemplateSummary, User,
};

/// Message returned for unknown or expired shares.
pub const SHARE_NOT_FOUND: &str = "Share not found or expired";

/// Template catalog backed by template, share, and user repositories.
#[derive(Clone)]
pub struct TemplateCatalogService<T, S, U> {
    templates: Arc<T>,
    shares: Arc<S>,
    users: Arc<U>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl<T, S, U> TemplateCatalogService<T, S, U> {
    /// Create a new service.
    pub fn new(
        templates: Arc<T>,
        shares: Arc<S>,
        users: Arc<U>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            templates,
            shares,
            users,
            clock,
        }
    }
}

pub(crate) fn map_template_repository_error(error: TemplateRepositoryError) -> Error {
    match error {
        TemplateRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("template repository unavailable: {message}"))
        }
        TemplateRepositoryError::Query { message } => {
            Error::internal(format!("template repository error: {message}"))
        }
        TemplateRepositoryError::Conflict { .. } => Error::conflict(
            "A template with this title already exists",
        )
        .with_details(serde_json::json!({ "field": "title", "code": "slug_taken" })),
    }
}

fn map_share_error(error: PublishShareRepositoryError) -> Error {
    match error {
        PublishShareRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("publish share repository unavailable: {message}"))
        }
        PublishShareRepositoryError::Query { message } => {
            Error::internal(format!("publish share repository error: {message}"))
        }
    }
}

impl<T, S, U> TemplateCatalogService<T, S, U>
where
    T: TemplateRepository,
    S: PublishShareRepository,
    U: UserRepository,
{
    /// Resolve authors for `templates`; a failed lookup leaves every author
    /// unresolved so callers fall back to the anonymous name.
    async fn authors(&self, templates: &[Template]) -> HashMap<IdentityId, User> {
        let mut ids: Vec<IdentityId> = templates.iter().map(|t| t.user_id.clone()).collect();
        ids.sort();
        ids.dedup();
        if ids.is_empty() {
            return HashMap::new();
        }
        match self.users.find_by_ids(&ids).await {
            Ok(users) => users.into_iter().map(|user| (user.id.clone(), user)).collect(),
            Err(error) => {
                warn!(%error, authors = ids.len(), "author lookup failed; showing anonymous");
                HashMap::new()
            }
        }
    }

    async fn summarise(&self, templates: Vec<Template>) -> Vec<TemplateSummary> {
        let authors = self.authors(&templates).await;
        templates
            .into_iter()
            .map(|template| {
                let author = author_for(&authors, &template.user_id);
                TemplateSummary::new(template, author)
            })
            .collect()
    }

    async fn detail(&self, template: Template) -> TemplateDetail {
        let authors = self.authors(std::slice::from_ref(&template)).await;
        let author = author_for(&authors, &template.user_id);
        TemplateDetail { template, author }
    }

    async fn live_share(&self, share_id: &str) -> Result<super::PublishShare, Error> {
        let share = self
            .shares
            .find_by_share_id(share_id)
            .await
            .map_err(map_share_error)?
            .ok_or_else(|| Error::not_found(SHARE_NOT_FOUND))?;
        if share.is_expired(self.clock.utc()) {
            return Err(Error::not_found(SHARE_NOT_FOUND));
        }
        Ok(share)
    }
}

fn author_for(authors: &HashMap<IdentityId, User>, id: &IdentityId) -> String {
    authors
        .get(id)
        .map_or(ANONYMOUS_AUTHOR, User::author_name)
        .to_owned()
}

#[async_trait]
impl<T, S, U> TemplateCatalog for TemplateCatalogService<T, S, U>
where
    T: TemplateRepository,
    S: PublishShareRepository,
    U: UserRepository,
{
    async fn list(&self) -> Result<Vec<TemplateSummary>, Error> {
        let templates = self
            .templates
            .list_all()
            .await
            .map_err(map_template_repository_error)?;
        Ok(self.summarise(templates).await)
    }

    async fn list_mine(&self, owner: &IdentityId) -> Result<Vec<TemplateSummary>, Error> {
        let templates = self
            .templates
            .list_by_owner(owner)
            .await
            .map_err(map_template_repository_error)?;
        Ok(self.summarise(templates).await)
    }

    async fn view(&self, slug: &str) -> Result<TemplateDetail, Error> {
        let template = self
            .templates
            .record_view(slug)
            .await
            .map_err(map_template_repository_error)?
            .ok_or_else(|| Error::not_found("Template not found"))?;
        Ok(self.detail(template).await)
    }

    async fn preview_share(&self, share_id: &str) -> Result<SharePreview, Error> {
        self.live_share(share_id).await.map(SharePreview::from)
    }

    async fn publish(
        &self,
        author: &Identity,
        share_id: &str,
        draft: PublishDraft,
    ) -> Result<TemplateDetail, Error> {
        let share = self.live_share(share_id).await?;
        let now = self.clock.utc();
        let template = Template {
            id: Uuid::new_v4(),
            slug: draft.slug().to_owned(),
            title: draft.title().to_owned(),
            description: draft.description().map(str::to_owned),
            template_type: share.template_type,
            code: share.code,
            user_id: author.id().clone(),
            views: 0,
            likes: 0,
            created_at: now,
            updated_at: now,
        };
        self.templates
            .insert(&template)
            .await
            .map_err(map_template_repository_error)?;
        info!(slug = %template.slug, share_id, "template published");
        Ok(self.detail(template).await)
    }
}

#[cfg(test)]
#[path = "template_catalog_service_tests.rs"]
mod tests;
