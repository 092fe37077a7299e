//! Internal Diesel row structs and their conversions into domain records.
//!
//! Rows never leave the persistence layer. Stored identifiers and usernames are
//! re-validated on the way out so a corrupt row surfaces as a query failure
//! instead of an invalid domain value.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{
    IdentityId, IdentityValidationError, Project, PublishShare, Template, User, Username,
    UsernameValidationError,
};

use super::schema::{projects, publish_shares, templates, users};

/// A stored row failed domain validation.
#[derive(Debug, thiserror::Error)]
pub(crate) enum RowConversionError {
    #[error("stored identity id is invalid: {0}")]
    Identity(#[from] IdentityValidationError),
    #[error("stored username is invalid: {0}")]
    Username(#[from] UsernameValidationError),
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub username: Option<String>,
    pub email: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RowConversionError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: IdentityId::new(row.id)?,
            username: row.username.map(Username::new).transpose()?,
            email: row.email,
            display_name: row.display_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct UserWrite<'a> {
    pub id: &'a str,
    pub username: Option<&'a str>,
    pub email: &'a str,
    pub display_name: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a User> for UserWrite<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: user.id.as_str(),
            username: user.username.as_ref().map(Username::as_str),
            email: &user.email,
            display_name: user.display_name.as_deref(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProjectRow {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub slug: String,
    pub template_type: String,
    pub repo_url: Option<String>,
    pub link: Option<String>,
    pub metadata: Option<Value>,
    pub owner_username: Option<String>,
    pub owner_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            user_id: project.user_id.as_str().to_owned(),
            name: project.name.clone(),
            description: project.description.clone(),
            slug: project.slug.clone(),
            template_type: project.template_type.clone(),
            repo_url: project.repo_url.clone(),
            link: project.link.clone(),
            metadata: project.metadata.clone(),
            owner_username: project.owner_username.clone(),
            owner_email: project.owner_email.clone(),
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

impl TryFrom<ProjectRow> for Project {
    type Error = RowConversionError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: IdentityId::new(row.user_id)?,
            name: row.name,
            description: row.description,
            slug: row.slug,
            template_type: row.template_type,
            repo_url: row.repo_url,
            link: row.link,
            metadata: row.metadata,
            owner_username: row.owner_username,
            owner_email: row.owner_email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = templates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TemplateRow {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub template_type: String,
    pub code: Value,
    pub user_id: String,
    pub views: i32,
    pub likes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Template> for TemplateRow {
    fn from(template: &Template) -> Self {
        Self {
            id: template.id,
            slug: template.slug.clone(),
            title: template.title.clone(),
            description: template.description.clone(),
            template_type: template.template_type.clone(),
            code: template.code.clone(),
            user_id: template.user_id.as_str().to_owned(),
            views: template.views,
            likes: template.likes,
            created_at: template.created_at,
            updated_at: template.updated_at,
        }
    }
}

impl TryFrom<TemplateRow> for Template {
    type Error = RowConversionError;

    fn try_from(row: TemplateRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            slug: row.slug,
            title: row.title,
            description: row.description,
            template_type: row.template_type,
            code: row.code,
            user_id: IdentityId::new(row.user_id)?,
            views: row.views,
            likes: row.likes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = publish_shares)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PublishShareRow {
    pub id: Uuid,
    pub share_id: String,
    pub code: Value,
    pub template_type: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<PublishShareRow> for PublishShare {
    fn from(row: PublishShareRow) -> Self {
        Self {
            id: row.id,
            share_id: row.share_id,
            code: row.code,
            template_type: row.template_type,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}
