//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers here mirror their JSON shape and register under the domain path
//! via `#[schema(as = ...)]`.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "forbidden")]
    Forbidden,
    #[schema(rename = "not_found")]
    NotFound,
    /// Collides with existing state, such as a taken username or title.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing store or the identity provider is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "Name and template type are required")]
    message: String,
    /// Correlation id, echoed in the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context such as `{"field": "name", "code": "missing_field"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Identity`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Identity)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct IdentitySchema {
    #[schema(example = "8b1c6a0e-5f0e-4d8e-9a57-0f3c2b1d7e44")]
    id: String,
    #[schema(example = "ada@example.com")]
    email: String,
    display_name: Option<String>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    id: String,
    /// Lowercase handle; absent until claimed.
    #[schema(example = "ada_l")]
    username: Option<String>,
    email: String,
    name: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::ports::UsernameStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::UsernameStatus)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UsernameStatusSchema {
    has_username: bool,
    user: Option<UserSchema>,
}

/// OpenAPI schema for [`crate::domain::Project`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Project)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProjectSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    user_id: String,
    #[schema(example = "My Token")]
    name: String,
    description: Option<String>,
    #[schema(example = "my-token-1700000000000")]
    slug: String,
    #[schema(example = "PyTeal")]
    template_type: String,
    repo_url: Option<String>,
    link: Option<String>,
    metadata: Option<serde_json::Value>,
    username: Option<String>,
    email: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::ProjectSummary`].
///
/// Public view without owner id or email.
#[derive(ToSchema)]
#[schema(as = crate::domain::ProjectSummary)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProjectSummarySchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    name: String,
    description: Option<String>,
    template_type: String,
    username: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
    repo_url: Option<String>,
    link: Option<String>,
}

/// OpenAPI schema for [`crate::domain::ProjectListing`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ProjectListing)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProjectListingSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    name: String,
    description: Option<String>,
    template_type: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::TemplateSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::TemplateSummary)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TemplateSummarySchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(example = "escrow-vault")]
    slug: String,
    title: String,
    description: Option<String>,
    template_type: String,
    /// Author username, or `Anonymous`.
    author: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    likes: i32,
    views: i32,
}

/// OpenAPI schema for [`crate::domain::TemplateDetail`].
#[derive(ToSchema)]
#[schema(as = crate::domain::TemplateDetail)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TemplateDetailSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    slug: String,
    title: String,
    description: Option<String>,
    template_type: String,
    code: serde_json::Value,
    user_id: String,
    views: i32,
    likes: i32,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
    author: String,
}

/// OpenAPI schema for [`crate::domain::SharePreview`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SharePreview)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SharePreviewSchema {
    share_id: String,
    template_type: String,
    code: serde_json::Value,
    #[schema(value_type = Option<String>, format = DateTime)]
    expires_at: Option<String>,
}

/// OpenAPI schema for [`crate::domain::LeaderboardEntry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::LeaderboardEntry)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct LeaderboardEntrySchema {
    rank: usize,
    user_id: String,
    username: Option<String>,
    project_count: usize,
}

/// OpenAPI schema for [`crate::domain::Leaderboard`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Leaderboard)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct LeaderboardSchema {
    top_users: Vec<LeaderboardEntrySchema>,
    this_month_count: usize,
    total_contracts: usize,
}
