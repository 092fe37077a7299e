//! Stage 1 of the cross-origin deploy relay.
//!
//! ```text
//! OPTIONS /api/deploy
//! POST    /api/deploy {"templateType":"TealScript","signedURL":"https://..."}
//! ```
//!
//! Both methods fail closed with `403` for any origin other than the single
//! allow-listed one. The origin check runs before the body is read so a
//! rejected request never reaches the parser.

use actix_web::http::header::{self, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder, post, route, web};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::domain::{DeploymentHandoff, Error, OriginPolicy};
use crate::inbound::http::ApiResult;
use crate::inbound::http::handoff_cookie;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Path stage 2 renders.
pub const DEPLOY_REDIRECT: &str = "/deploy?external=true";

/// Request body posted by the external origin.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeployRequest {
    pub template_type: Option<String>,
    #[serde(rename = "signedURL")]
    pub signed_url: Option<String>,
}

/// Acknowledgement pointing the browser at stage 2.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeployResponse {
    pub success: bool,
    pub message: String,
    pub redirect_to: String,
}

fn request_origin(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
}

fn check_origin<'p>(req: &HttpRequest, policy: &'p OriginPolicy) -> Result<&'p str, Error> {
    let origin = request_origin(req);
    if policy.permits(origin) {
        Ok(policy.allowed())
    } else {
        warn!(origin = ?origin, "deploy relay rejected origin");
        Err(Error::forbidden("CORS: Origin not allowed"))
    }
}

fn with_cors(builder: &mut HttpResponseBuilder, origin: &str) {
    if let Ok(value) = HeaderValue::from_str(origin) {
        builder.insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, value));
    }
    builder
        .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"))
        .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
        .insert_header((header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true"))
        .insert_header((header::VARY, "Origin"));
}

/// CORS preflight for the deploy relay.
#[utoipa::path(
    options,
    path = "/api/deploy",
    responses(
        (status = 200, description = "Origin allowed"),
        (status = 403, description = "Origin not allowed")
    ),
    tags = ["deploy"],
    operation_id = "deployPreflight",
    security([])
)]
#[route("/api/deploy", method = "OPTIONS")]
pub async fn deploy_preflight(req: HttpRequest, state: web::Data<HttpState>) -> HttpResponse {
    match check_origin(&req, &state.deploy.origin) {
        Ok(origin) => {
            let mut builder = HttpResponse::Ok();
            with_cors(&mut builder, origin);
            builder.finish()
        }
        Err(_) => HttpResponse::Forbidden().finish(),
    }
}

/// Stage a deployment for the caller and point them at stage 2.
#[utoipa::path(
    post,
    path = "/api/deploy",
    request_body = DeployRequest,
    responses(
        (status = 200, description = "Deployment staged", body = DeployResponse,
            headers(("Set-Cookie" = String, description = "Signed deployment-data cookie"))),
        (status = 400, description = "templateType or signedURL missing", body = ErrorSchema),
        (status = 401, description = "Authentication required", body = ErrorSchema),
        (status = 403, description = "Origin not allowed", body = ErrorSchema)
    ),
    tags = ["deploy"],
    operation_id = "stageDeployment"
)]
#[post("/api/deploy")]
pub async fn stage_deployment(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let settings = &state.deploy;
    let origin = check_origin(&req, &settings.origin)?;
    let identity = session.require_identity()?;
    let payload: DeployRequest = serde_json::from_slice(&body)
        .map_err(|_| Error::invalid_request("Request body must be a JSON object"))?;

    let handoff = DeploymentHandoff::stage(
        payload.template_type,
        payload.signed_url,
        identity.id().clone(),
        state.clock.utc(),
    )?;
    let cookie = handoff_cookie::seal(&handoff, &settings.handoff_key, settings.cookie_secure)?;
    info!(
        user_id = %identity.id(),
        template_type = %handoff.template_type,
        "deployment staged"
    );

    let mut builder = HttpResponse::Ok();
    with_cors(&mut builder, origin);
    Ok(builder.cookie(cookie).json(DeployResponse {
        success: true,
        message: "Ready to create project".to_owned(),
        redirect_to: DEPLOY_REDIRECT.to_owned(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_DEPLOY_ORIGIN;
    use crate::inbound::http::handoff_cookie::HANDOFF_COOKIE;
    use crate::inbound::http::state::HttpState;
    use crate::inbound::http::test_utils::{
        StateBuilder, session_resource, sign_in_as, test_session_middleware,
    };
    use actix_web::http::{Method, StatusCode};
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

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
            .service(deploy_preflight)
            .service(stage_deployment)
    }

    fn body() -> Value {
        json!({ "templateType": "TealScript", "signedURL": "https://signed.example/abc" })
    }

    #[rstest]
    #[case(None)]
    #[case(Some("https://evil.example"))]
    #[case(Some("https://algocraft.fun/"))]
    #[actix_web::test]
    async fn foreign_origins_are_forbidden_without_cookie(#[case] origin: Option<&str>) {
        let app = test::init_service(app_for(StateBuilder::default().build())).await;
        let cookie = sign_in_as(&app, "user-1").await;

        let mut req = test::TestRequest::post()
            .uri("/api/deploy")
            .cookie(cookie)
            .set_json(body());
        if let Some(origin) = origin {
            req = req.insert_header((header::ORIGIN, origin));
        }
        let res = test::call_service(&app, req.to_request()).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert!(res.headers().get(header::SET_COOKIE).is_none());
    }

    #[actix_web::test]
    async fn allowed_origin_stages_a_signed_handoff() {
        let app = test::init_service(app_for(StateBuilder::default().build())).await;
        let cookie = sign_in_as(&app, "user-1").await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/deploy")
                .insert_header((header::ORIGIN, DEFAULT_DEPLOY_ORIGIN))
                .cookie(cookie)
                .set_json(body())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some(DEFAULT_DEPLOY_ORIGIN)
        );
        let handoff = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == HANDOFF_COOKIE)
            .expect("handoff cookie");
        assert!(handoff.value().contains("TealScript"));
        let json: Value = test::read_body_json(res).await;
        assert_eq!(json.get("redirectTo"), Some(&json!(DEPLOY_REDIRECT)));
    }

    #[actix_web::test]
    async fn anonymous_caller_is_unauthorised() {
        let app = test::init_service(app_for(StateBuilder::default().build())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/deploy")
                .insert_header((header::ORIGIN, DEFAULT_DEPLOY_ORIGIN))
                .set_json(body())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[case(json!({ "signedURL": "https://signed.example/abc" }))]
    #[case(json!({ "templateType": "TealScript" }))]
    #[actix_web::test]
    async fn missing_fields_are_bad_requests(#[case] payload: Value) {
        let app = test::init_service(app_for(StateBuilder::default().build())).await;
        let cookie = sign_in_as(&app, "user-1").await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/deploy")
                .insert_header((header::ORIGIN, DEFAULT_DEPLOY_ORIGIN))
                .cookie(cookie)
                .set_json(payload)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json: Value = test::read_body_json(res).await;
        assert_eq!(
            json.get("message"),
            Some(&json!("templateType and signedURL are required"))
        );
    }

    #[rstest]
    #[case(Some(DEFAULT_DEPLOY_ORIGIN), StatusCode::OK)]
    #[case(Some("https://evil.example"), StatusCode::FORBIDDEN)]
    #[case(None, StatusCode::FORBIDDEN)]
    #[actix_web::test]
    async fn preflight_mirrors_the_origin_policy(
        #[case] origin: Option<&str>,
        #[case] status: StatusCode,
    ) {
        let app = test::init_service(app_for(StateBuilder::default().build())).await;
        let mut req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/deploy");
        if let Some(origin) = origin {
            req = req.insert_header((header::ORIGIN, origin));
        }
        let res = test::call_service(&app, req.to_request()).await;
        assert_eq!(res.status(), status);
        let allow_methods = res
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .and_then(|value| value.to_str().ok());
        if status == StatusCode::OK {
            assert_eq!(allow_methods, Some("POST, OPTIONS"));
        } else {
            assert!(allow_methods.is_none());
        }
    }
}
