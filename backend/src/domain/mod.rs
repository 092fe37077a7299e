//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed entities for the contract showcase and the
//! services that implement its use-cases. Nothing in this module depends on
//! the HTTP framework or the database driver; adapters reach the domain only
//! through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and its stable identifier.
//! - Identity / User / Username: authenticated caller and registered profile.
//! - Project / Template / PublishShare: the catalogue aggregates.
//! - OriginPolicy / DeploymentHandoff: the cross-origin deploy relay.
//! - Leaderboard / PublicProfile / BrowsePage: read models for pages.
//! - `*Service`: driving-port implementations.

pub mod community;
pub mod contracts_browser;
pub mod deployment;
pub mod error;
pub mod identity;
pub mod ports;
pub mod project;
pub mod slug;
pub mod template;
pub mod trace_id;
pub mod user;

mod community_service;
mod project_catalog_service;
mod template_catalog_service;
mod username_registry_service;

pub use self::community::{
    LEADERBOARD_API_LIMIT, LEADERBOARD_PAGE_LIMIT, Leaderboard, LeaderboardEntry, MonthlyActivity,
    OwnProfile, PublicProfile, PublicUser, monthly_activity,
};
pub use self::community_service::CommunityService;
pub use self::contracts_browser::{BrowsePage, BrowseQuery, ITEMS_PER_PAGE, SortOrder, browse};
pub use self::deployment::{
    DEFAULT_DEPLOY_ORIGIN, DeployForm, DeploymentHandoff, HANDOFF_TTL_SECS, OriginPolicy,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity::{IDENTITY_ID_MAX, Identity, IdentityId, IdentityValidationError};
pub use self::project::{
    Project, ProjectDraft, ProjectListing, ProjectOwner, ProjectSummary, ProjectValidationError,
};
pub use self::project_catalog_service::ProjectCatalogService;
pub use self::slug::{is_valid_slug, slugify, suffixed_slug};
pub use self::template::{
    PublishDraft, PublishShare, PublishValidationError, SharePreview, Template, TemplateDetail,
    TemplateSummary,
};
pub use self::template_catalog_service::{SHARE_NOT_FOUND, TemplateCatalogService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    ANONYMOUS_AUTHOR, USERNAME_MAX, USERNAME_MIN, User, Username, UsernameValidationError,
    author_name,
};
pub use self::username_registry_service::{USERNAME_TAKEN, UsernameRegistryService};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use showcase::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<u32> {
///     Err(Error::not_found("missing"))
/// }
///
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
