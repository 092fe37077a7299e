//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use actix_web::cookie::Key;
use mockable::Clock;

use crate::domain::OriginPolicy;
use crate::domain::ports::{
    CommunityQuery, IdentityVerifier, ProjectCatalog, TemplateCatalog, UsernameRegistry,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub identity: Arc<dyn IdentityVerifier>,
    pub usernames: Arc<dyn UsernameRegistry>,
    pub projects: Arc<dyn ProjectCatalog>,
    pub templates: Arc<dyn TemplateCatalog>,
    pub community: Arc<dyn CommunityQuery>,
}

/// Settings for the cross-origin deploy relay.
#[derive(Clone)]
pub struct DeployRelaySettings {
    /// The single external origin allowed to stage deployments.
    pub origin: OriginPolicy,
    /// Key signing the handoff cookie; shared with the session middleware.
    pub handoff_key: Key,
    /// Whether the handoff cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
}

/// Values surfaced by the sign-in page model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInSettings {
    pub site_url: String,
    pub auth_provider_url: Option<String>,
    pub captcha_site_key: Option<String>,
}

impl SignInSettings {
    /// Callback URL the OAuth provider redirects back to.
    pub fn callback_url(&self) -> String {
        format!("{}/api/auth/callback", self.site_url.trim_end_matches('/'))
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub identity: Arc<dyn IdentityVerifier>,
    pub usernames: Arc<dyn UsernameRegistry>,
    pub projects: Arc<dyn ProjectCatalog>,
    pub templates: Arc<dyn TemplateCatalog>,
    pub community: Arc<dyn CommunityQuery>,
    pub deploy: DeployRelaySettings,
    pub sign_in: SignInSettings,
    pub clock: Arc<dyn Clock + Send + Sync>,
}

impl HttpState {
    /// Construct state from the ports bundle and adapter settings.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use actix_web::cookie::Key;
    /// use mockable::DefaultClock;
    /// use showcase::domain::{
    ///     CommunityService, OriginPolicy, ProjectCatalogService, TemplateCatalogService,
    ///     UsernameRegistryService,
    /// };
    /// use showcase::inbound::http::state::{
    ///     DeployRelaySettings, HttpState, HttpStatePorts, SignInSettings,
    /// };
    /// use showcase::outbound::identity::FixtureIdentityVerifier;
    /// use showcase::outbound::memory::{
    ///     InMemoryProjectRepository, InMemoryPublishShareRepository,
    ///     InMemoryTemplateRepository, InMemoryUserRepository,
    /// };
    ///
    /// let clock = Arc::new(DefaultClock);
    /// let users = Arc::new(InMemoryUserRepository::default());
    /// let projects = Arc::new(InMemoryProjectRepository::default());
    /// let templates = Arc::new(InMemoryTemplateRepository::default());
    /// let shares = Arc::new(InMemoryPublishShareRepository::default());
    /// let ports = HttpStatePorts {
    ///     identity: Arc::new(FixtureIdentityVerifier),
    ///     usernames: Arc::new(UsernameRegistryService::new(users.clone(), clock.clone())),
    ///     projects: Arc::new(ProjectCatalogService::new(
    ///         projects.clone(),
    ///         users.clone(),
    ///         clock.clone(),
    ///     )),
    ///     templates: Arc::new(TemplateCatalogService::new(
    ///         templates.clone(),
    ///         shares,
    ///         users.clone(),
    ///         clock.clone(),
    ///     )),
    ///     community: Arc::new(CommunityService::new(projects, users, templates, clock.clone())),
    /// };
    /// let deploy = DeployRelaySettings {
    ///     origin: OriginPolicy::default(),
    ///     handoff_key: Key::generate(),
    ///     cookie_secure: false,
    /// };
    /// let state = HttpState::new(ports, deploy, SignInSettings::default(), clock);
    /// assert_eq!(state.deploy.origin.allowed(), "https://algocraft.fun");
    /// ```
    pub fn new(
        ports: HttpStatePorts,
        deploy: DeployRelaySettings,
        sign_in: SignInSettings,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        let HttpStatePorts {
            identity,
            usernames,
            projects,
            templates,
            community,
        } = ports;
        Self {
            identity,
            usernames,
            projects,
            templates,
            community,
            deploy,
            sign_in,
            clock,
        }
    }
}
