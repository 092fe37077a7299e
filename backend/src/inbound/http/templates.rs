//! Template catalog and publish handlers.
//!
//! ```text
//! GET  /api/templates
//! GET  /api/templates/user
//! GET  /api/templates/{slug}
//! GET  /api/publish/{shareId}
//! POST /api/publish/{shareId}
//! ```
//!
//! `/api/templates/user` must be registered before `/api/templates/{slug}` so
//! the literal segment wins.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, PublishDraft, PublishValidationError, SharePreview, TemplateDetail, TemplateSummary,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    ErrorSchema, SharePreviewSchema, TemplateDetailSchema, TemplateSummarySchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, ValidationCode, field_error};

/// Envelope for template lists.
#[derive(Debug, Serialize, ToSchema)]
pub struct TemplateListResponse {
    #[schema(value_type = Vec<TemplateSummarySchema>)]
    pub templates: Vec<TemplateSummary>,
}

/// Request body for publishing a share as a template.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PublishRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

fn map_publish_validation_error(err: &PublishValidationError) -> Error {
    let code = match err {
        PublishValidationError::MissingTitle => ValidationCode::MissingField,
        PublishValidationError::UnsluggableTitle => ValidationCode::InvalidTitle,
    };
    field_error(FieldName::new("title"), code, err.to_string())
}

/// All templates, newest first.
#[utoipa::path(
    get,
    path = "/api/templates",
    responses(
        (status = 200, description = "Templates", body = TemplateListResponse),
        (status = 503, description = "Template store unavailable", body = ErrorSchema)
    ),
    tags = ["templates"],
    operation_id = "listTemplates",
    security([])
)]
#[get("/api/templates")]
pub async fn list_templates(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<TemplateListResponse>> {
    let templates = state.templates.list().await?;
    Ok(web::Json(TemplateListResponse { templates }))
}

/// The caller's templates, newest first.
#[utoipa::path(
    get,
    path = "/api/templates/user",
    responses(
        (status = 200, description = "Caller's templates", body = TemplateListResponse),
        (status = 401, description = "Authentication required", body = ErrorSchema)
    ),
    tags = ["templates"],
    operation_id = "listMyTemplates"
)]
#[get("/api/templates/user")]
pub async fn list_my_templates(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<TemplateListResponse>> {
    let identity = session.require_identity()?;
    let templates = state.templates.list_mine(identity.id()).await?;
    Ok(web::Json(TemplateListResponse { templates }))
}

/// Fetch one template and count the view.
#[utoipa::path(
    get,
    path = "/api/templates/{slug}",
    params(("slug" = String, Path, description = "Template slug")),
    responses(
        (status = 200, description = "Template with incremented view count", body = TemplateDetailSchema),
        (status = 404, description = "Template not found", body = ErrorSchema)
    ),
    tags = ["templates"],
    operation_id = "getTemplate",
    security([])
)]
#[get("/api/templates/{slug}")]
pub async fn get_template(
    state: web::Data<HttpState>,
    slug: web::Path<String>,
) -> ApiResult<web::Json<TemplateDetail>> {
    let detail = state.templates.view(&slug).await?;
    Ok(web::Json(detail))
}

/// Read a publish share to pre-fill the publish form.
#[utoipa::path(
    get,
    path = "/api/publish/{share_id}",
    params(("share_id" = String, Path, description = "Share token")),
    responses(
        (status = 200, description = "Share contents", body = SharePreviewSchema),
        (status = 404, description = "Share not found or expired", body = ErrorSchema)
    ),
    tags = ["templates"],
    operation_id = "previewShare",
    security([])
)]
#[get("/api/publish/{share_id}")]
pub async fn preview_share(
    state: web::Data<HttpState>,
    share_id: web::Path<String>,
) -> ApiResult<web::Json<SharePreview>> {
    let preview = state.templates.preview_share(&share_id).await?;
    Ok(web::Json(preview))
}

/// Publish a share as a new template owned by the caller.
#[utoipa::path(
    post,
    path = "/api/publish/{share_id}",
    params(("share_id" = String, Path, description = "Share token")),
    request_body = PublishRequest,
    responses(
        (status = 201, description = "Template published", body = TemplateDetailSchema),
        (status = 400, description = "Invalid title", body = ErrorSchema),
        (status = 401, description = "Authentication required", body = ErrorSchema),
        (status = 404, description = "Share not found or expired", body = ErrorSchema),
        (status = 409, description = "Title already used", body = ErrorSchema)
    ),
    tags = ["templates"],
    operation_id = "publishTemplate"
)]
#[post("/api/publish/{share_id}")]
pub async fn publish_template(
    state: web::Data<HttpState>,
    session: SessionContext,
    share_id: web::Path<String>,
    payload: web::Json<PublishRequest>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_identity()?;
    let PublishRequest { title, description } = payload.into_inner();
    let draft =
        PublishDraft::new(title, description).map_err(|err| map_publish_validation_error(&err))?;
    let detail = state
        .templates
        .publish(&identity, &share_id, draft)
        .await?;
    Ok(HttpResponse::Created().json(detail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PublishShare;
    use crate::inbound::http::state::HttpState;
    use crate::inbound::http::test_utils::{
        StateBuilder, session_resource, sign_in_as, test_session_middleware,
    };
    use crate::test_support::fixture_now;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use chrono::Duration;
    use rstest::rstest;
    use serde_json::{Value, json};
    use uuid::Uuid;

    fn app_for(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .service(session_resource())
            .service(list_templates)
            .service(list_my_templates)
            .service(get_template)
            .service(preview_share)
            .service(publish_template)
    }

    fn stage(builder: &StateBuilder, share_id: &str, expires_in: Option<Duration>) {
        builder.shares.stage(PublishShare {
            id: Uuid::new_v4(),
            share_id: share_id.to_owned(),
            code: json!({ "files": [{ "name": "contract.py" }] }),
            template_type: "PyTeal".to_owned(),
            created_at: fixture_now(),
            expires_at: expires_in.map(|ttl| fixture_now() + ttl),
        });
    }

    async fn publish<S, B>(app: &S, cookie: actix_web::cookie::Cookie<'static>, title: &str) -> StatusCode
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse<B>,
                Error = actix_web::Error,
            >,
        B: actix_web::body::MessageBody,
    {
        test::call_service(
            app,
            test::TestRequest::post()
                .uri("/api/publish/share-1")
                .cookie(cookie)
                .set_json(json!({ "title": title }))
                .to_request(),
        )
        .await
        .status()
    }

    #[actix_web::test]
    async fn published_template_counts_each_view() {
        let builder = StateBuilder::default();
        stage(&builder, "share-1", None);
        let app = test::init_service(app_for(builder.build())).await;
        let cookie = sign_in_as(&app, "user-1").await;

        assert_eq!(publish(&app, cookie, "Escrow Vault").await, StatusCode::CREATED);

        let mut views = Vec::new();
        for _ in 0..2 {
            let res = test::call_service(
                &app,
                test::TestRequest::get()
                    .uri("/api/templates/escrow-vault")
                    .to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::OK);
            let body: Value = test::read_body_json(res).await;
            assert_eq!(body.get("author"), Some(&json!("Anonymous")));
            views.push(body.get("views").and_then(Value::as_i64).expect("views"));
        }
        assert_eq!(views, vec![1, 2]);
    }

    #[actix_web::test]
    async fn republishing_the_same_title_conflicts() {
        let builder = StateBuilder::default();
        stage(&builder, "share-1", None);
        let app = test::init_service(app_for(builder.build())).await;
        let cookie = sign_in_as(&app, "user-1").await;

        assert_eq!(publish(&app, cookie.clone(), "Vault").await, StatusCode::CREATED);
        assert_eq!(publish(&app, cookie, "Vault").await, StatusCode::CONFLICT);
    }

    #[rstest]
    #[case("   ", StatusCode::BAD_REQUEST)]
    #[case("???", StatusCode::BAD_REQUEST)]
    #[actix_web::test]
    async fn unusable_titles_are_rejected(#[case] title: &str, #[case] status: StatusCode) {
        let builder = StateBuilder::default();
        stage(&builder, "share-1", None);
        let app = test::init_service(app_for(builder.build())).await;
        let cookie = sign_in_as(&app, "user-1").await;

        assert_eq!(publish(&app, cookie, title).await, status);
    }

    #[actix_web::test]
    async fn expired_share_is_not_found() {
        let builder = StateBuilder::default();
        stage(&builder, "share-1", Some(Duration::seconds(-1)));
        let app = test::init_service(app_for(builder.build())).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/publish/share-1").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body.get("message"), Some(&json!("Share not found or expired")));
    }

    #[actix_web::test]
    async fn anonymous_publish_is_unauthorised() {
        let builder = StateBuilder::default();
        stage(&builder, "share-1", None);
        let app = test::init_service(app_for(builder.build())).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/publish/share-1")
                .set_json(json!({ "title": "Vault" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn user_listing_is_not_mistaken_for_a_slug() {
        let app = test::init_service(app_for(StateBuilder::default().build())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/templates/user").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
