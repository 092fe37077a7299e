//! Portal entry point: load configuration, wire storage, serve HTTP.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

use showcase::inbound::http::health::HealthState;
use showcase::inbound::http::session_config::{BuildMode, session_settings_from_env};
use showcase::inbound::http::state::SignInSettings;
use showcase::outbound::persistence::{DbPool, PoolConfig, migrate};

use server::{AppConfig, ServerConfig, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let app_config = AppConfig::load().map_err(std::io::Error::other)?;
    let build_mode = BuildMode::from_debug_assertions();
    app_config
        .validate(build_mode)
        .map_err(std::io::Error::other)?;
    let session =
        session_settings_from_env(&DefaultEnv::new(), build_mode).map_err(std::io::Error::other)?;

    let sign_in = SignInSettings {
        site_url: app_config.site_url().to_owned(),
        auth_provider_url: app_config.auth_provider_url.clone(),
        captcha_site_key: app_config
            .captcha_site_key()
            .map_err(std::io::Error::other)?,
    };
    let mut config = ServerConfig::new(
        session,
        app_config.bind_addr().map_err(std::io::Error::other)?,
        app_config.deploy_allowed_origin().to_owned(),
    )
    .with_build_mode(build_mode)
    .with_sign_in(sign_in)
    .with_jwt_secret(app_config.jwt_secret.clone().map(Zeroizing::new));

    if let Some(database_url) = app_config.database_url.clone() {
        migrate(database_url.clone())
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(std::io::Error::other)?;
        info!("database pool ready");
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let outcome = create_server(health_state.clone(), config)?.await;
    health_state.mark_unhealthy();
    outcome
}
