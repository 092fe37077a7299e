//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{HttpResponse, Resource, test, web};
use mockable::Clock;

use crate::domain::ports::{
    CommunityQuery, IdentityVerifier, ProjectCatalog, TemplateCatalog, UsernameRegistry,
};
use crate::domain::{
    CommunityService, Error, OriginPolicy, ProjectCatalogService, TemplateCatalogService,
    UsernameRegistryService,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{DeployRelaySettings, HttpState, HttpStatePorts, SignInSettings};
use crate::outbound::identity::FixtureIdentityVerifier;
use crate::outbound::memory::{
    InMemoryProjectRepository, InMemoryPublishShareRepository, InMemoryTemplateRepository,
    InMemoryUserRepository,
};
use crate::test_support::{fixture_clock, identity};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by a response, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

async fn establish_session(
    session: SessionContext,
    id: web::Path<String>,
) -> Result<HttpResponse, Error> {
    session.persist_identity(&identity(&id.into_inner()))?;
    Ok(HttpResponse::Ok().finish())
}

/// `POST /test/session/{id}` stores a fixture identity in the session.
pub fn session_resource() -> Resource {
    web::resource("/test/session/{id}").route(web::post().to(establish_session))
}

/// Sign in through [`session_resource`] and return the session cookie.
pub async fn sign_in_as<S, B>(app: &S, id: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri(&format!("/test/session/{id}"))
            .to_request(),
    )
    .await;
    session_cookie(&res).expect("session cookie set")
}

/// Assembles an [`HttpState`] over in-memory adapters.
///
/// Individual ports can be swapped for mocks; the repositories stay reachable
/// for seeding.
pub struct StateBuilder {
    pub users: Arc<InMemoryUserRepository>,
    pub projects: Arc<InMemoryProjectRepository>,
    pub templates: Arc<InMemoryTemplateRepository>,
    pub shares: Arc<InMemoryPublishShareRepository>,
    clock: Arc<dyn Clock + Send + Sync>,
    identity: Option<Arc<dyn IdentityVerifier>>,
    usernames: Option<Arc<dyn UsernameRegistry>>,
    project_catalog: Option<Arc<dyn ProjectCatalog>>,
    template_catalog: Option<Arc<dyn TemplateCatalog>>,
    community: Option<Arc<dyn CommunityQuery>>,
    handoff_key: Key,
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self {
            users: Arc::default(),
            projects: Arc::default(),
            templates: Arc::default(),
            shares: Arc::default(),
            clock: fixture_clock(),
            identity: None,
            usernames: None,
            project_catalog: None,
            template_catalog: None,
            community: None,
            handoff_key: Key::generate(),
        }
    }
}

impl StateBuilder {
    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_identity_verifier(mut self, verifier: Arc<dyn IdentityVerifier>) -> Self {
        self.identity = Some(verifier);
        self
    }

    pub fn with_usernames(mut self, registry: Arc<dyn UsernameRegistry>) -> Self {
        self.usernames = Some(registry);
        self
    }

    pub fn with_project_catalog(mut self, catalog: Arc<dyn ProjectCatalog>) -> Self {
        self.project_catalog = Some(catalog);
        self
    }

    pub fn with_template_catalog(mut self, catalog: Arc<dyn TemplateCatalog>) -> Self {
        self.template_catalog = Some(catalog);
        self
    }

    pub fn with_community(mut self, community: Arc<dyn CommunityQuery>) -> Self {
        self.community = Some(community);
        self
    }

    pub fn handoff_key(&self) -> Key {
        self.handoff_key.clone()
    }

    pub fn build(&self) -> HttpState {
        let clock = self.clock.clone();
        let ports = HttpStatePorts {
            identity: self
                .identity
                .clone()
                .unwrap_or_else(|| Arc::new(FixtureIdentityVerifier)),
            usernames: self.usernames.clone().unwrap_or_else(|| {
                Arc::new(UsernameRegistryService::new(self.users.clone(), clock.clone()))
            }),
            projects: self.project_catalog.clone().unwrap_or_else(|| {
                Arc::new(ProjectCatalogService::new(
                    self.projects.clone(),
                    self.users.clone(),
                    clock.clone(),
                ))
            }),
            templates: self.template_catalog.clone().unwrap_or_else(|| {
                Arc::new(TemplateCatalogService::new(
                    self.templates.clone(),
                    self.shares.clone(),
                    self.users.clone(),
                    clock.clone(),
                ))
            }),
            community: self.community.clone().unwrap_or_else(|| {
                Arc::new(CommunityService::new(
                    self.projects.clone(),
                    self.users.clone(),
                    self.templates.clone(),
                    clock.clone(),
                ))
            }),
        };
        let deploy = DeployRelaySettings {
            origin: OriginPolicy::default(),
            handoff_key: self.handoff_key.clone(),
            cookie_secure: false,
        };
        let sign_in = SignInSettings {
            site_url: "http://localhost:3000".to_owned(),
            auth_provider_url: Some("https://auth.example.com/auth/v1".to_owned()),
            captcha_site_key: None,
        };
        HttpState::new(ports, deploy, sign_in, clock)
    }
}
