//! Wiring of repositories, services, and adapter settings into [`HttpState`].

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{info, warn};
use zeroize::Zeroizing;

use showcase::domain::ports::{
    IdentityVerifier, ProjectRepository, PublishShareRepository, TemplateRepository,
    UserRepository,
};
use showcase::domain::{
    CommunityService, OriginPolicy, ProjectCatalogService, TemplateCatalogService,
    UsernameRegistryService,
};
use showcase::inbound::http::session_config::BuildMode;
use showcase::inbound::http::state::{
    DeployRelaySettings, HttpState, HttpStatePorts, SignInSettings,
};
use showcase::outbound::identity::{FixtureIdentityVerifier, JwtIdentityVerifier};
use showcase::outbound::memory::{
    InMemoryProjectRepository, InMemoryPublishShareRepository, InMemoryTemplateRepository,
    InMemoryUserRepository,
};
use showcase::outbound::persistence::{
    DieselProjectRepository, DieselPublishShareRepository, DieselTemplateRepository,
    DieselUserRepository,
};

use super::{ConfigError, ServerConfig};

/// Repositories backing the services, whatever their storage.
struct Repositories<U, P, T, S> {
    users: Arc<U>,
    projects: Arc<P>,
    templates: Arc<T>,
    shares: Arc<S>,
}

impl<U, P, T, S> Repositories<U, P, T, S>
where
    U: UserRepository + 'static,
    P: ProjectRepository + 'static,
    T: TemplateRepository + 'static,
    S: PublishShareRepository + 'static,
{
    fn into_ports(
        self,
        identity: Arc<dyn IdentityVerifier>,
        clock: &Arc<dyn Clock + Send + Sync>,
    ) -> HttpStatePorts {
        let Self {
            users,
            projects,
            templates,
            shares,
        } = self;
        HttpStatePorts {
            identity,
            usernames: Arc::new(UsernameRegistryService::new(
                Arc::clone(&users),
                Arc::clone(clock),
            )),
            projects: Arc::new(ProjectCatalogService::new(
                Arc::clone(&projects),
                Arc::clone(&users),
                Arc::clone(clock),
            )),
            templates: Arc::new(TemplateCatalogService::new(
                Arc::clone(&templates),
                shares,
                Arc::clone(&users),
                Arc::clone(clock),
            )),
            community: Arc::new(CommunityService::new(
                projects,
                users,
                templates,
                Arc::clone(clock),
            )),
        }
    }
}

/// JWT verification when a secret is configured. Debug builds without one
/// fall back to the development verifier that accepts `dev:<subject>`
/// tokens; release builds refuse to start.
fn build_identity_verifier(
    jwt_secret: Option<&Zeroizing<String>>,
    mode: BuildMode,
) -> Result<Arc<dyn IdentityVerifier>, ConfigError> {
    match (jwt_secret, mode) {
        (Some(secret), _) => Ok(Arc::new(JwtIdentityVerifier::new(secret.clone()))),
        (None, BuildMode::Debug) => {
            warn!("no JWT secret configured; accepting development tokens only");
            Ok(Arc::new(FixtureIdentityVerifier))
        }
        (None, BuildMode::Release) => Err(ConfigError::JwtSecretRequired),
    }
}

fn build_ports(
    config: &ServerConfig,
    clock: &Arc<dyn Clock + Send + Sync>,
) -> Result<HttpStatePorts, ConfigError> {
    let identity = build_identity_verifier(config.jwt_secret.as_ref(), config.build_mode)?;
    let ports = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            Repositories {
                users: Arc::new(DieselUserRepository::new(pool.clone())),
                projects: Arc::new(DieselProjectRepository::new(pool.clone())),
                templates: Arc::new(DieselTemplateRepository::new(pool.clone())),
                shares: Arc::new(DieselPublishShareRepository::new(pool.clone())),
            }
            .into_ports(identity, clock)
        }
        None => {
            warn!("no database configured; data lives in memory for this process only");
            Repositories {
                users: Arc::new(InMemoryUserRepository::default()),
                projects: Arc::new(InMemoryProjectRepository::default()),
                templates: Arc::new(InMemoryTemplateRepository::default()),
                shares: Arc::new(InMemoryPublishShareRepository::default()),
            }
            .into_ports(identity, clock)
        }
    };
    Ok(ports)
}

/// Assemble the handler state from `config`.
pub(super) fn build_http_state(config: &ServerConfig) -> Result<HttpState, ConfigError> {
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(DefaultClock);
    let ports = build_ports(config, &clock)?;
    let deploy = DeployRelaySettings {
        origin: OriginPolicy::new(config.deploy_origin.clone()),
        handoff_key: config.session.key.clone(),
        cookie_secure: config.session.cookie_secure,
    };
    Ok(HttpState::new(ports, deploy, config.sign_in.clone(), clock))
}
