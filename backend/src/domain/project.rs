//! Showcase project records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::IdentityId;

/// Validation errors raised by [`ProjectDraft::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectValidationError {
    /// The project name was missing or blank.
    #[error("Name and template type are required")]
    MissingName,
    /// The template type tag was missing or blank.
    #[error("Name and template type are required")]
    MissingTemplateType,
}

impl ProjectValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingName => "name",
            Self::MissingTemplateType => "templateType",
        }
    }
}

/// Validated input for creating a project.
///
/// Optional text fields are trimmed and blank values dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    name: String,
    template_type: String,
    description: Option<String>,
    repo_url: Option<String>,
    link: Option<String>,
    metadata: Option<Value>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

impl ProjectDraft {
    /// Validate the required name and template type.
    pub fn new(
        name: Option<String>,
        template_type: Option<String>,
    ) -> Result<Self, ProjectValidationError> {
        let name = non_blank(name).ok_or(ProjectValidationError::MissingName)?;
        let template_type =
            non_blank(template_type).ok_or(ProjectValidationError::MissingTemplateType)?;
        Ok(Self {
            name,
            template_type,
            description: None,
            repo_url: None,
            link: None,
            metadata: None,
        })
    }

    /// Attach a description.
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = non_blank(description);
        self
    }

    /// Attach a source repository URL.
    pub fn with_repo_url(mut self, repo_url: Option<String>) -> Self {
        self.repo_url = non_blank(repo_url);
        self
    }

    /// Attach an external link, such as a deployment URL.
    pub fn with_link(mut self, link: Option<String>) -> Self {
        self.link = non_blank(link);
        self
    }

    /// Attach an opaque metadata blob.
    pub fn with_metadata(mut self, metadata: Option<Value>) -> Self {
        self.metadata = metadata.filter(|value| !value.is_null());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template_type(&self) -> &str {
        &self.template_type
    }
}

/// Ownership details copied onto a project at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOwner {
    pub id: IdentityId,
    pub username: Option<String>,
    pub email: String,
}

/// Persisted showcase project.
///
/// ## Invariants
/// - `slug` is derived once at creation and never recomputed.
/// - No update or delete operation exists; `updated_at` starts equal to
///   `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub user_id: IdentityId,
    pub name: String,
    pub description: Option<String>,
    pub slug: String,
    pub template_type: String,
    pub repo_url: Option<String>,
    pub link: Option<String>,
    pub metadata: Option<Value>,
    #[serde(rename = "username")]
    pub owner_username: Option<String>,
    #[serde(rename = "email")]
    pub owner_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Materialise a draft into a record owned by `owner`.
    pub fn from_draft(
        draft: ProjectDraft,
        owner: ProjectOwner,
        slug: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        let ProjectDraft {
            name,
            template_type,
            description,
            repo_url,
            link,
            metadata,
        } = draft;
        Self {
            id: Uuid::new_v4(),
            user_id: owner.id,
            name,
            description,
            slug,
            template_type,
            repo_url,
            link,
            metadata,
            owner_username: owner.username,
            owner_email: owner.email,
            created_at,
            updated_at: created_at,
        }
    }
}

/// Public project summary shown in the contracts browser.
///
/// Omits contact-identifying fields (owner id and email).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub template_type: String,
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub repo_url: Option<String>,
    pub link: Option<String>,
}

impl From<Project> for ProjectSummary {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            description: project.description,
            template_type: project.template_type,
            username: project.owner_username,
            created_at: project.created_at,
            updated_at: project.updated_at,
            repo_url: project.repo_url,
            link: project.link,
        }
    }
}

/// Minimal project listing across all owners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListing {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub template_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Project> for ProjectListing {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            description: project.description,
            template_type: project.template_type,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(None, Some("TealScript"), ProjectValidationError::MissingName)]
    #[case(Some("  "), Some("TealScript"), ProjectValidationError::MissingName)]
    #[case(Some("Vault"), None, ProjectValidationError::MissingTemplateType)]
    #[case(Some("Vault"), Some(""), ProjectValidationError::MissingTemplateType)]
    fn draft_requires_name_and_template_type(
        #[case] name: Option<&str>,
        #[case] template_type: Option<&str>,
        #[case] expected: ProjectValidationError,
    ) {
        let result = ProjectDraft::new(name.map(str::to_owned), template_type.map(str::to_owned));
        assert_eq!(result, Err(expected));
    }

    #[rstest]
    fn draft_drops_blank_optionals() {
        let draft = ProjectDraft::new(Some("Vault".into()), Some("PyTeal".into()))
            .expect("valid draft")
            .with_description(Some("   ".into()))
            .with_link(Some(" https://example.com ".into()))
            .with_metadata(Some(serde_json::Value::Null));
        assert_eq!(draft.description, None);
        assert_eq!(draft.link.as_deref(), Some("https://example.com"));
        assert_eq!(draft.metadata, None);
    }

    #[rstest]
    fn public_summary_omits_owner_contact_fields() {
        let created_at = DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000).expect("timestamp");
        let draft = ProjectDraft::new(Some("Vault".into()), Some("PyTeal".into()))
            .expect("valid draft")
            .with_metadata(Some(json!({ "network": "testnet" })));
        let owner = ProjectOwner {
            id: IdentityId::new("user-1").expect("valid id"),
            username: Some("ada".into()),
            email: "ada@example.com".into(),
        };
        let project = Project::from_draft(draft, owner, "vault-1".into(), created_at);

        let value = serde_json::to_value(ProjectSummary::from(project)).expect("serialise");
        let object = value.as_object().expect("object");
        assert!(!object.contains_key("userId"));
        assert!(!object.contains_key("email"));
        assert_eq!(object.get("username"), Some(&json!("ada")));
        assert_eq!(object.get("templateType"), Some(&json!("PyTeal")));
    }
}
