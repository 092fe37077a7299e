//! Application settings loaded through OrthoConfig.
//!
//! Values come from `SHOWCASE_*` environment variables, CLI flags, or a
//! configuration file, in OrthoConfig's usual precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use showcase::domain::DEFAULT_DEPLOY_ORIGIN;
use showcase::inbound::http::session_config::BuildMode;

const DEFAULT_SITE_URL: &str = "http://localhost:3000";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Startup configuration for the portal.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SHOWCASE")]
pub struct AppConfig {
    /// The single external origin allowed to call `/api/deploy`.
    pub deploy_allowed_origin: Option<String>,
    /// Public base URL used to build the OAuth callback.
    pub site_url: Option<String>,
    /// OAuth provider base, e.g. `https://<project>.supabase.co/auth/v1`.
    pub auth_provider_url: Option<String>,
    /// HS256 secret for provider access tokens.
    pub jwt_secret: Option<String>,
    #[ortho_config(default = false)]
    pub captcha_enabled: bool,
    pub captcha_site_key: Option<String>,
    pub captcha_secret_key: Option<String>,
    /// PostgreSQL URL; without it the in-memory adapters are used.
    pub database_url: Option<String>,
    pub bind_addr: Option<String>,
}

/// Inconsistent or malformed settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("captcha is enabled but {missing} is not set")]
    CaptchaKeyMissing { missing: &'static str },
    #[error("SHOWCASE_JWT_SECRET must be set in release builds")]
    JwtSecretRequired,
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

impl AppConfig {
    pub fn deploy_allowed_origin(&self) -> &str {
        self.deploy_allowed_origin
            .as_deref()
            .unwrap_or(DEFAULT_DEPLOY_ORIGIN)
    }

    pub fn site_url(&self) -> &str {
        self.site_url.as_deref().unwrap_or(DEFAULT_SITE_URL)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| ConfigError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// The CAPTCHA site key to publish, after checking both keys exist.
    pub fn captcha_site_key(&self) -> Result<Option<String>, ConfigError> {
        if !self.captcha_enabled {
            return Ok(None);
        }
        if self.captcha_secret_key.is_none() {
            return Err(ConfigError::CaptchaKeyMissing {
                missing: "SHOWCASE_CAPTCHA_SECRET_KEY",
            });
        }
        self.captcha_site_key
            .clone()
            .map(Some)
            .ok_or(ConfigError::CaptchaKeyMissing {
                missing: "SHOWCASE_CAPTCHA_SITE_KEY",
            })
    }

    /// Run every cross-field check once at startup.
    ///
    /// Release builds must verify real provider tokens, so a missing JWT
    /// secret is only tolerated in debug builds.
    pub fn validate(&self, mode: BuildMode) -> Result<(), ConfigError> {
        self.bind_addr()?;
        self.captcha_site_key()?;
        if self.jwt_secret.is_none() && mode == BuildMode::Release {
            return Err(ConfigError::JwtSecretRequired);
        }
        Ok(())
    }
}
