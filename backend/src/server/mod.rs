//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppConfig, ConfigError};

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::body::{BoxBody, EitherBody};
use actix_web::{App, HttpServer, web};
use tracing::info;
use zeroize::Zeroizing;

use showcase::domain::ports::UsernameRegistry;
use showcase::inbound::http::health::{HealthState, live, ready};
use showcase::inbound::http::session_config::{BuildMode, SessionSettings, session_middleware};
use showcase::inbound::http::state::{HttpState, SignInSettings};
use showcase::inbound::http::{configure_api, configure_pages};
use showcase::outbound::persistence::DbPool;
use showcase::{AccessGate, Trace};
#[cfg(debug_assertions)]
use showcase::doc::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use state_builders::build_http_state;

/// Everything the HTTP server needs, resolved at startup.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) deploy_origin: String,
    pub(crate) sign_in: SignInSettings,
    pub(crate) jwt_secret: Option<Zeroizing<String>>,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) build_mode: BuildMode,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, deploy_origin: String) -> Self {
        Self {
            session,
            bind_addr,
            deploy_origin,
            sign_in: SignInSettings::default(),
            jwt_secret: None,
            db_pool: None,
            build_mode: BuildMode::from_debug_assertions(),
        }
    }

    #[must_use]
    pub fn with_build_mode(mut self, build_mode: BuildMode) -> Self {
        self.build_mode = build_mode;
        self
    }

    #[must_use]
    pub fn with_sign_in(mut self, sign_in: SignInSettings) -> Self {
        self.sign_in = sign_in;
        self
    }

    #[must_use]
    pub fn with_jwt_secret(mut self, secret: Option<Zeroizing<String>>) -> Self {
        self.jwt_secret = secret;
        self
    }

    /// Use PostgreSQL repositories instead of the in-memory ones.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    usernames: Arc<dyn UsernameRegistry>,
    session: SessionSettings,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        usernames,
        session,
    } = deps;

    // Last wrap runs first: trace, then session, then the gate.
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(AccessGate::new(usernames))
        .wrap(session_middleware(&session))
        .wrap(Trace)
        .service(ready)
        .service(live)
        .configure(configure_api)
        .configure(configure_pages);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the HTTP server; the returned [`Server`] must be awaited.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails or the
/// identity verifier cannot be built for this build mode.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state =
        web::Data::new(build_http_state(&config).map_err(std::io::Error::other)?);
    let usernames = Arc::clone(&http_state.usernames);
    let ServerConfig {
        session, bind_addr, ..
    } = config;
    info!(
        %bind_addr,
        key_fingerprint = %session.fingerprint(),
        "starting showcase server"
    );

    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
        usernames,
        session,
    };
    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
