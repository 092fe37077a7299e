//! Username precondition for page routes.
//!
//! A signed-in caller without a username is redirected to `/setup-username`
//! on every path outside the skip list. Anonymous callers pass through; pages
//! handle their own sign-in prompts. A failing registry lookup is logged and
//! the request continues.

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_session::SessionExt;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error, HttpResponse};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, warn};

use crate::domain::ports::UsernameRegistry;
use crate::inbound::http::session::SessionContext;

/// Where unregistered callers are sent.
pub const SETUP_USERNAME_PATH: &str = "/setup-username";

/// Path prefixes the gate never intercepts.
pub const DEFAULT_SKIP_PREFIXES: &[&str] = &[
    SETUP_USERNAME_PATH,
    "/api/",
    "/signin",
    "/_next/",
    "/static/",
    "/favicon.ico",
    "/health/",
    "/docs",
    "/api-docs",
];

/// Middleware factory.
///
/// Register it inside the session middleware so the session is readable:
///
/// ```ignore
/// App::new()
///     .wrap(AccessGate::new(registry))
///     .wrap(session_middleware)
/// ```
#[derive(Clone)]
pub struct AccessGate {
    registry: Arc<dyn UsernameRegistry>,
    skip: Rc<Vec<String>>,
}

impl AccessGate {
    pub fn new(registry: Arc<dyn UsernameRegistry>) -> Self {
        Self {
            registry,
            skip: Rc::new(DEFAULT_SKIP_PREFIXES.iter().map(|p| (*p).to_owned()).collect()),
        }
    }

    /// Exempt another path prefix.
    #[must_use]
    pub fn skip_prefix(mut self, prefix: impl Into<String>) -> Self {
        Rc::make_mut(&mut self.skip).push(prefix.into());
        self
    }
}

fn is_skipped(skip: &[String], path: &str) -> bool {
    skip.iter().any(|prefix| path.starts_with(prefix.as_str()))
}

impl<S, B> Transform<S, ServiceRequest> for AccessGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessGateMiddleware {
            service: Rc::new(service),
            registry: Arc::clone(&self.registry),
            skip: Rc::clone(&self.skip),
        }))
    }
}

/// Service wrapper produced by [`AccessGate`].
pub struct AccessGateMiddleware<S> {
    service: Rc<S>,
    registry: Arc<dyn UsernameRegistry>,
    skip: Rc<Vec<String>>,
}

impl<S, B> Service<ServiceRequest> for AccessGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        if is_skipped(&self.skip, req.path()) {
            return Box::pin(async move { Ok(service.call(req).await?.map_into_left_body()) });
        }
        let identity = SessionContext::new(req.get_session()).identity();
        let registry = Arc::clone(&self.registry);

        Box::pin(async move {
            let Some(identity) = identity else {
                return Ok(service.call(req).await?.map_into_left_body());
            };
            match registry.check(identity.id()).await {
                Ok(status) if !status.has_username => {
                    debug!(path = req.path(), "redirecting unregistered caller");
                    let redirect = HttpResponse::TemporaryRedirect()
                        .insert_header((header::LOCATION, SETUP_USERNAME_PATH))
                        .finish();
                    Ok(req.into_response(redirect).map_into_right_body())
                }
                Ok(_) => Ok(service.call(req).await?.map_into_left_body()),
                Err(error) => {
                    warn!(%error, path = req.path(), "username check failed; letting request through");
                    Ok(service.call(req).await?.map_into_left_body())
                }
            }
        })
    }
}
