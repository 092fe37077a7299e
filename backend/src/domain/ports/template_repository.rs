//! Port for template persistence.

use async_trait::async_trait;

use crate::domain::{IdentityId, Template};

use super::define_port_error;

define_port_error! {
    /// Errors raised by template repository adapters.
    pub enum TemplateRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "template repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "template repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Conflict { message: String } => "template repository conflict: {message}",
    }
}

/// Storage for published templates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Persist a new template; a taken slug is a [`TemplateRepositoryError::Conflict`].
    async fn insert(&self, template: &Template) -> Result<(), TemplateRepositoryError>;

    /// Every template, newest created first.
    async fn list_all(&self) -> Result<Vec<Template>, TemplateRepositoryError>;

    /// Templates owned by `owner`, newest created first.
    async fn list_by_owner(
        &self,
        owner: &IdentityId,
    ) -> Result<Vec<Template>, TemplateRepositoryError>;

    /// Atomically add one to the view counter of the template at `slug` and
    /// return the updated record, or `None` when no template has that slug.
    async fn record_view(&self, slug: &str) -> Result<Option<Template>, TemplateRepositoryError>;
}
