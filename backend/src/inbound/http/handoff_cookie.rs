//! Signed cookie carrying a [`DeploymentHandoff`] between the relay stages.
//!
//! The value is the handoff as JSON, signed with the session key so a client
//! cannot forge or alter a staged deployment. Stage 2 treats anything it
//! cannot verify or parse as "nothing staged".

use actix_web::HttpRequest;
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, CookieJar, Key, SameSite};
use tracing::warn;

use crate::domain::{DeploymentHandoff, Error, HANDOFF_TTL_SECS};

/// Cookie name shared by both relay stages.
pub const HANDOFF_COOKIE: &str = "deployment-data";

/// Sign `handoff` into a cookie ready for `Set-Cookie`.
pub fn seal(handoff: &DeploymentHandoff, key: &Key, secure: bool) -> Result<Cookie<'static>, Error> {
    let value = serde_json::to_string(handoff)
        .map_err(|err| Error::internal(format!("failed to encode deployment handoff: {err}")))?;
    let cookie = Cookie::build(HANDOFF_COOKIE, value)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(HANDOFF_TTL_SECS))
        .finish();

    let mut jar = CookieJar::new();
    jar.signed_mut(key).add(cookie);
    jar.get(HANDOFF_COOKIE)
        .cloned()
        .ok_or_else(|| Error::internal("signed handoff cookie missing from jar"))
}

/// Verify and decode the handoff cookie on `req`, if present.
pub fn open(req: &HttpRequest, key: &Key) -> Option<DeploymentHandoff> {
    let cookie = req.cookie(HANDOFF_COOKIE)?;
    let mut jar = CookieJar::new();
    jar.add_original(cookie);
    let Some(verified) = jar.signed(key).get(HANDOFF_COOKIE) else {
        warn!("deployment handoff cookie failed signature verification");
        return None;
    };
    match serde_json::from_str(verified.value()) {
        Ok(handoff) => Some(handoff),
        Err(error) => {
            warn!(%error, "deployment handoff cookie is not valid JSON");
            None
        }
    }
}
