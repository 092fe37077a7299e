//! Published templates and the publish shares they are created from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{IdentityId, slugify};

/// Persisted template.
///
/// ## Invariants
/// - `slug` is unique across templates.
/// - `views` increases by exactly one per detail fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub template_type: String,
    pub code: Value,
    pub user_id: IdentityId,
    pub views: i32,
    pub likes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing entry with the author label resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub template_type: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub likes: i32,
    pub views: i32,
}

impl TemplateSummary {
    /// Summarise `template` under the given author label.
    pub fn new(template: Template, author: impl Into<String>) -> Self {
        Self {
            id: template.id,
            slug: template.slug,
            title: template.title,
            description: template.description,
            template_type: template.template_type,
            author: author.into(),
            created_at: template.created_at,
            likes: template.likes,
            views: template.views,
        }
    }
}

/// Full template including its code payload and resolved author.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDetail {
    #[serde(flatten)]
    pub template: Template,
    pub author: String,
}

/// Validation errors raised by [`PublishDraft::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PublishValidationError {
    /// The title was missing or blank.
    #[error("Title is required")]
    MissingTitle,
    /// The title contains no characters usable in a slug.
    #[error("Title must contain at least one letter or digit")]
    UnsluggableTitle,
}

/// Validated publish form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishDraft {
    title: String,
    slug: String,
    description: Option<String>,
}

impl PublishDraft {
    /// Validate the title and derive the template slug from it.
    ///
    /// # Examples
    /// ```
    /// use showcase::domain::PublishDraft;
    ///
    /// let draft = PublishDraft::new(Some("Escrow Vault".into()), None).expect("valid");
    /// assert_eq!(draft.slug(), "escrow-vault");
    /// ```
    pub fn new(
        title: Option<String>,
        description: Option<String>,
    ) -> Result<Self, PublishValidationError> {
        let title = title
            .map(|raw| raw.trim().to_owned())
            .filter(|trimmed| !trimmed.is_empty())
            .ok_or(PublishValidationError::MissingTitle)?;
        let slug = slugify(&title);
        if slug.is_empty() {
            return Err(PublishValidationError::UnsluggableTitle);
        }
        let description = description
            .map(|raw| raw.trim().to_owned())
            .filter(|trimmed| !trimmed.is_empty());
        Ok(Self {
            title,
            slug,
            description,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Code staged by the external IDE for publishing.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishShare {
    pub id: Uuid,
    pub share_id: String,
    pub code: Value,
    pub template_type: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl PublishShare {
    /// Whether the share has passed its expiry at `now`.
    ///
    /// Shares without an expiry never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

/// Publish form pre-fill derived from a share.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharePreview {
    pub share_id: String,
    pub template_type: String,
    pub code: Value,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<PublishShare> for SharePreview {
    fn from(share: PublishShare) -> Self {
        Self {
            share_id: share.share_id,
            template_type: share.template_type,
            code: share.code,
            expires_at: share.expires_at,
        }
    }
}
