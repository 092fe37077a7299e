//! Project catalog handlers.
//!
//! ```text
//! POST /api/add-project
//! GET  /api/projects
//! GET  /api/projects/all
//! GET  /api/contracts
//! ```
//!
//! The two public lists degrade to an empty array when the catalog fails so
//! the pages that render them still load.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::{Error, Project, ProjectDraft, ProjectListing, ProjectSummary, ProjectValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    ErrorSchema, ProjectListingSchema, ProjectSchema, ProjectSummarySchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

/// Request body for `POST /api/add-project`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub template_type: Option<String>,
    pub repo_url: Option<String>,
    pub link: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Value>,
}

impl TryFrom<AddProjectRequest> for ProjectDraft {
    type Error = ProjectValidationError;

    fn try_from(value: AddProjectRequest) -> Result<Self, Self::Error> {
        let AddProjectRequest {
            name,
            description,
            template_type,
            repo_url,
            link,
            metadata,
        } = value;
        Ok(Self::new(name, template_type)?
            .with_description(description)
            .with_repo_url(repo_url)
            .with_link(link)
            .with_metadata(metadata))
    }
}

fn map_project_validation_error(err: &ProjectValidationError) -> Error {
    missing_field_error(FieldName::new(err.field()), err.to_string())
}

/// Create a showcase project owned by the caller.
#[utoipa::path(
    post,
    path = "/api/add-project",
    request_body = AddProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectSchema),
        (status = 400, description = "Name or template type missing", body = ErrorSchema),
        (status = 401, description = "Authentication required", body = ErrorSchema),
        (status = 404, description = "No user record for the caller", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "addProject"
)]
#[post("/api/add-project")]
pub async fn add_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AddProjectRequest>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_identity()?;
    let draft = ProjectDraft::try_from(payload.into_inner())
        .map_err(|err| map_project_validation_error(&err))?;
    let project = state.projects.create(&identity, draft).await?;
    Ok(HttpResponse::Created().json(project))
}

/// The caller's own projects, newest first.
#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "Caller's projects", body = [ProjectSchema]),
        (status = 401, description = "Authentication required", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "listMyProjects"
)]
#[get("/api/projects")]
pub async fn list_my_projects(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Project>>> {
    let identity = session.require_identity()?;
    let projects = state.projects.list_mine(identity.id()).await?;
    Ok(web::Json(projects))
}

/// Reduced records across all owners.
#[utoipa::path(
    get,
    path = "/api/projects/all",
    responses((status = 200, description = "All projects", body = [ProjectListingSchema])),
    tags = ["projects"],
    operation_id = "listAllProjects",
    security([])
)]
#[get("/api/projects/all")]
pub async fn list_all_projects(state: web::Data<HttpState>) -> web::Json<Vec<ProjectListing>> {
    let listings = state.projects.list_all().await.unwrap_or_else(|error| {
        warn!(%error, "project listing failed; returning empty list");
        Vec::new()
    });
    web::Json(listings)
}

/// Public project summaries, most recently updated first.
#[utoipa::path(
    get,
    path = "/api/contracts",
    responses((status = 200, description = "Public contracts", body = [ProjectSummarySchema])),
    tags = ["projects"],
    operation_id = "listContracts",
    security([])
)]
#[get("/api/contracts")]
pub async fn list_contracts(state: web::Data<HttpState>) -> web::Json<Vec<ProjectSummary>> {
    let summaries = state.projects.list_public().await.unwrap_or_else(|error| {
        warn!(%error, "contract listing failed; returning empty list");
        Vec::new()
    });
    web::Json(summaries)
}
