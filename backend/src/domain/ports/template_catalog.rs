//! Driving port for the template catalog and the publish flow.

use async_trait::async_trait;

use crate::domain::{
    Error, Identity, IdentityId, PublishDraft, SharePreview, TemplateDetail, TemplateSummary,
};

/// Use-case port for browsing and publishing templates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateCatalog: Send + Sync {
    /// All templates, newest first, with resolved author names.
    async fn list(&self) -> Result<Vec<TemplateSummary>, Error>;

    /// The caller's templates, newest first.
    async fn list_mine(&self, owner: &IdentityId) -> Result<Vec<TemplateSummary>, Error>;

    /// Fetch a template and count the view.
    async fn view(&self, slug: &str) -> Result<TemplateDetail, Error>;

    /// Read an unexpired publish share to pre-fill the publish form.
    async fn preview_share(&self, share_id: &str) -> Result<SharePreview, Error>;

    /// Publish the share's code as a new template owned by `author`.
    async fn publish(
        &self,
        author: &Identity,
        share_id: &str,
        draft: PublishDraft,
    ) -> Result<TemplateDetail, Error>;
}
