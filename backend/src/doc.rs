//! OpenAPI documentation for the JSON API.
//!
//! Page view models are not part of the document; they exist for the site
//! shell rather than for API clients. Swagger UI serves the document in debug
//! builds and `openapi-dump` prints it.

use crate::inbound::http::auth::{OAuthCallbackResponse, SignInRequest};
use crate::inbound::http::deploy::{DeployRequest, DeployResponse};
use crate::inbound::http::projects::AddProjectRequest;
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, IdentitySchema, LeaderboardEntrySchema, LeaderboardSchema,
    ProjectListingSchema, ProjectSchema, ProjectSummarySchema, SharePreviewSchema,
    TemplateDetailSchema, TemplateSummarySchema, UserSchema, UsernameStatusSchema,
};
use crate::inbound::http::templates::{PublishRequest, TemplateListResponse};
use crate::inbound::http::users::{SetupUsernameRequest, SetupUsernameResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Private session cookie issued by POST /api/signin.",
            ))),
        );
    }
}

/// OpenAPI document for the `/api` surface and health probes.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Contract showcase API",
        description = "Identity, username registry, project and template catalogues, and the deploy relay."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::sign_in,
        crate::inbound::http::auth::sign_out,
        crate::inbound::http::auth::oauth_callback,
        crate::inbound::http::users::check_username,
        crate::inbound::http::users::claim_username,
        crate::inbound::http::projects::add_project,
        crate::inbound::http::projects::list_my_projects,
        crate::inbound::http::projects::list_all_projects,
        crate::inbound::http::projects::list_contracts,
        crate::inbound::http::templates::list_templates,
        crate::inbound::http::templates::list_my_templates,
        crate::inbound::http::templates::get_template,
        crate::inbound::http::templates::preview_share,
        crate::inbound::http::templates::publish_template,
        crate::inbound::http::deploy::deploy_preflight,
        crate::inbound::http::deploy::stage_deployment,
        crate::inbound::http::leaderboard::get_leaderboard,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        IdentitySchema,
        UserSchema,
        UsernameStatusSchema,
        ProjectSchema,
        ProjectSummarySchema,
        ProjectListingSchema,
        TemplateSummarySchema,
        TemplateDetailSchema,
        SharePreviewSchema,
        LeaderboardSchema,
        LeaderboardEntrySchema,
        SignInRequest,
        OAuthCallbackResponse,
        SetupUsernameRequest,
        SetupUsernameResponse,
        AddProjectRequest,
        TemplateListResponse,
        PublishRequest,
        DeployRequest,
        DeployResponse,
    )),
    tags(
        (name = "auth", description = "Sign-in and OAuth callback"),
        (name = "users", description = "Username registry"),
        (name = "projects", description = "Project catalogue"),
        (name = "templates", description = "Template catalogue and publishing"),
        (name = "deploy", description = "Cross-origin deploy relay"),
        (name = "community", description = "Leaderboard"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn schema_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            other => panic!("expected object schema for {name}, got {other:?}"),
        }
    }

    #[rstest]
    #[case("/api/signin")]
    #[case("/api/setup-username")]
    #[case("/api/add-project")]
    #[case("/api/templates/{slug}")]
    #[case("/api/publish/{share_id}")]
    #[case("/api/deploy")]
    #[case("/api/leaderboard")]
    #[case("/health/ready")]
    fn api_paths_are_documented(#[case] path: &str) {
        assert!(ApiDoc::openapi().paths.paths.contains_key(path), "{path} missing");
    }

    #[rstest]
    fn page_routes_are_not_documented() {
        let doc = ApiDoc::openapi();
        assert!(!doc.paths.paths.keys().any(|path| !path.starts_with("/api/") && !path.starts_with("/health/")));
    }

    #[rstest]
    fn error_schema_exposes_code_message_and_trace_id() {
        let fields = schema_fields("crate.domain.Error");
        for field in ["code", "message", "traceId", "details"] {
            assert!(fields.iter().any(|f| f == field), "missing {field}");
        }
    }

    #[rstest]
    fn user_schema_uses_wire_names() {
        let fields = schema_fields("crate.domain.User");
        assert!(fields.iter().any(|f| f == "name"));
        assert!(fields.iter().any(|f| f == "createdAt"));
    }
}
