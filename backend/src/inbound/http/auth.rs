//! Sign-in, sign-out, and the OAuth provider callback.
//!
//! ```text
//! POST /api/signin {"accessToken":"..."}
//! POST /api/signout
//! GET  /api/oauth/callback?code=...
//! ```
//!
//! Sign-in trades a provider-issued access token for an identity stored in
//! the private session cookie. Everything downstream reads the identity from
//! the session; no handler re-verifies tokens.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::domain::ports::IdentityVerificationError;
use crate::domain::{Error, Identity};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, IdentitySchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_text};

/// Sign-in request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    /// Access token issued by the OAuth provider.
    pub access_token: Option<String>,
}

/// Query parameters the OAuth provider appends to the callback URL.
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// Acknowledgement returned for a successful callback.
#[derive(Debug, Serialize, ToSchema)]
pub struct OAuthCallbackResponse {
    pub success: bool,
    pub message: String,
    pub code: String,
}

fn map_verification_error(error: IdentityVerificationError) -> Error {
    match error {
        IdentityVerificationError::Rejected { message } => {
            warn!(reason = %message, "access token rejected");
            Error::unauthorized("Invalid access token")
        }
        IdentityVerificationError::Unavailable { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
    }
}

/// Verify an access token and start a session.
#[utoipa::path(
    post,
    path = "/api/signin",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = IdentitySchema,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing token", body = ErrorSchema),
        (status = 401, description = "Invalid token", body = ErrorSchema),
        (status = 503, description = "Identity provider unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signIn",
    security([])
)]
#[post("/api/signin")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignInRequest>,
) -> ApiResult<web::Json<Identity>> {
    let token = require_text(
        payload.into_inner().access_token,
        FieldName::new("accessToken"),
        "Access token is required",
    )?;
    let identity = state
        .identity
        .verify(&token)
        .await
        .map_err(map_verification_error)?;
    session.persist_identity(&identity)?;
    info!(identity = %identity.id(), "session established");
    Ok(web::Json(identity))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/api/signout",
    responses((status = 204, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "signOut",
    security([])
)]
#[post("/api/signout")]
pub async fn sign_out(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

fn callback_outcome(query: OAuthCallbackQuery) -> ApiResult<web::Json<OAuthCallbackResponse>> {
    let OAuthCallbackQuery { code, error } = query;
    if let Some(reason) = error {
        warn!(%reason, "OAuth provider reported an error");
        return Err(Error::invalid_request("OAuth authentication failed"));
    }
    let code = code
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::invalid_request("Missing authorization code"))?;
    Ok(web::Json(OAuthCallbackResponse {
        success: true,
        message: "OAuth callback received".to_owned(),
        code,
    }))
}

/// Acknowledge the OAuth provider's redirect.
///
/// The provider's own client completes the token exchange; this endpoint only
/// reports what came back.
#[utoipa::path(
    get,
    path = "/api/oauth/callback",
    params(
        ("code" = Option<String>, Query, description = "Authorization code"),
        ("error" = Option<String>, Query, description = "Provider error")
    ),
    responses(
        (status = 200, description = "Callback received", body = OAuthCallbackResponse),
        (status = 400, description = "Provider error or missing code", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "oauthCallback",
    security([])
)]
#[get("/api/oauth/callback")]
pub async fn oauth_callback(
    query: web::Query<OAuthCallbackQuery>,
) -> ApiResult<web::Json<OAuthCallbackResponse>> {
    callback_outcome(query.into_inner())
}

/// Same as [`oauth_callback`], at the path the sign-in page hands the provider.
#[get("/api/auth/callback")]
pub async fn auth_callback(
    query: web::Query<OAuthCallbackQuery>,
) -> ApiResult<web::Json<OAuthCallbackResponse>> {
    callback_outcome(query.into_inner())
}
