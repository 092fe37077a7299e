//! Username setup handlers.
//!
//! ```text
//! GET  /api/setup-username
//! POST /api/setup-username {"username":"ada"}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::UsernameStatus;
use crate::domain::{User, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema, UsernameStatusSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_username_error, require_text};

/// Request body for claiming a username.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SetupUsernameRequest {
    pub username: Option<String>,
}

/// Response for a successful claim.
#[derive(Debug, Serialize, ToSchema)]
pub struct SetupUsernameResponse {
    pub success: bool,
    #[schema(value_type = UserSchema)]
    pub user: User,
}

/// Report whether the caller has claimed a username.
#[utoipa::path(
    get,
    path = "/api/setup-username",
    responses(
        (status = 200, description = "Registration status", body = UsernameStatusSchema),
        (status = 401, description = "Authentication required", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "checkUsername"
)]
#[get("/api/setup-username")]
pub async fn check_username(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UsernameStatus>> {
    let identity = session.require_identity()?;
    let status = state.usernames.check(identity.id()).await?;
    Ok(web::Json(status))
}

/// Claim a username for the caller.
///
/// Input is trimmed and lower-cased before validation.
#[utoipa::path(
    post,
    path = "/api/setup-username",
    request_body = SetupUsernameRequest,
    responses(
        (status = 200, description = "Username claimed", body = SetupUsernameResponse),
        (status = 400, description = "Invalid username", body = ErrorSchema),
        (status = 401, description = "Authentication required", body = ErrorSchema),
        (status = 409, description = "Username taken", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "claimUsername"
)]
#[post("/api/setup-username")]
pub async fn claim_username(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SetupUsernameRequest>,
) -> ApiResult<web::Json<SetupUsernameResponse>> {
    let identity = session.require_identity()?;
    let raw = require_text(
        payload.into_inner().username,
        FieldName::new("username"),
        "Username is required",
    )?;
    let username = Username::new(raw.to_lowercase()).map_err(|err| invalid_username_error(&err))?;
    let user = state.usernames.claim(&identity, username).await?;
    Ok(web::Json(SetupUsernameResponse {
        success: true,
        user,
    }))
}
