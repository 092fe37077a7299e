//! Live server harness shared by the behaviour suites.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The server mounts the same routes and
//! middleware stack as the binary over in-memory repositories, so scenarios
//! exercise the gate, the session cookie, and the deploy relay end to end.
//! `WorldFixture` stops the server even if a scenario panics.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::ServerHandle;
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use awc::Client;
use mockable::DefaultClock;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use showcase::domain::{
    CommunityService, OriginPolicy, ProjectCatalogService, TRACE_ID_HEADER,
    TemplateCatalogService, UsernameRegistryService,
};
use showcase::inbound::http::health::{HealthState, live, ready};
use showcase::inbound::http::session_config::{SessionSettings, session_middleware};
use showcase::inbound::http::state::{
    DeployRelaySettings, HttpState, HttpStatePorts, SignInSettings,
};
use showcase::inbound::http::{configure_api, configure_pages};
use showcase::outbound::identity::FixtureIdentityVerifier;
use showcase::outbound::memory::{
    InMemoryProjectRepository, InMemoryPublishShareRepository, InMemoryTemplateRepository,
    InMemoryUserRepository,
};
use showcase::{AccessGate, Trace};

/// Outcome of the most recent request.
#[derive(Debug, Default)]
pub(crate) struct Exchange {
    pub(crate) status: u16,
    pub(crate) body: Value,
    pub(crate) trace_id: Option<String>,
    pub(crate) location: Option<String>,
    pub(crate) allow_origin: Option<String>,
    pub(crate) set_cookies: Vec<String>,
}

pub(crate) struct PortalWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) users: Arc<InMemoryUserRepository>,
    pub(crate) shares: Arc<InMemoryPublishShareRepository>,
    /// Cookies the simulated browser holds, by name.
    pub(crate) cookies: BTreeMap<String, String>,
    pub(crate) last: Option<Exchange>,
}

impl PortalWorld {
    pub(crate) fn last(&self) -> &Exchange {
        self.last.as_ref().expect("a request was sent")
    }

    fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    fn absorb_set_cookie(&mut self, raw: &str) {
        let Ok(cookie) = Cookie::parse(raw.to_owned()) else {
            return;
        };
        let expired = cookie
            .max_age()
            .is_some_and(|age| age.is_zero() || age.is_negative());
        if expired || cookie.value().is_empty() {
            self.cookies.remove(cookie.name());
        } else {
            self.cookies
                .insert(cookie.name().to_owned(), cookie.value().to_owned());
        }
    }
}

pub(crate) type SharedWorld = Rc<RefCell<PortalWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(self.world.clone());
    }
}

pub(crate) fn shutdown(world: SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it, so the world stays
    // borrowed across `block_on`. The future must not borrow the world.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

/// A request the simulated browser sends.
#[derive(Debug, Clone)]
pub(crate) struct Call {
    method: Method,
    path: String,
    origin: Option<String>,
    json: Option<Value>,
}

impl Call {
    pub(crate) fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    pub(crate) fn post(path: &str, json: Value) -> Self {
        Self {
            json: Some(json),
            ..Self::new(Method::POST, path)
        }
    }

    pub(crate) fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_owned(),
            origin: None,
            json: None,
        }
    }

    pub(crate) fn from_origin(mut self, origin: &str) -> Self {
        self.origin = Some(origin.to_owned());
        self
    }
}

fn header_string(headers: &header::HeaderMap, name: impl header::AsHeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Send `call` with the cookies held by the world and record the outcome.
pub(crate) fn send(world: &SharedWorld, call: Call) {
    let cookie_header = world.borrow().cookie_header();
    let exchange = with_world_async(world, |base_url| async move {
        // Redirects stay visible to the scenarios.
        let client = Client::builder().disable_redirects().finish();
        let mut request = client.request(call.method, format!("{base_url}{}", call.path));
        if let Some(cookies) = cookie_header {
            request = request.insert_header((header::COOKIE, cookies));
        }
        if let Some(origin) = call.origin {
            request = request.insert_header((header::ORIGIN, origin));
        }
        let mut response = match call.json {
            Some(json) => request.send_json(&json).await,
            None => request.send().await,
        }
        .expect("request reaches the server");

        let headers = response.headers();
        let set_cookies = headers
            .get_all(header::SET_COOKIE)
            .filter_map(|value| value.to_str().ok())
            .map(str::to_owned)
            .collect();
        let mut exchange = Exchange {
            status: response.status().as_u16(),
            body: Value::Null,
            trace_id: header_string(headers, TRACE_ID_HEADER),
            location: header_string(headers, header::LOCATION),
            allow_origin: header_string(headers, header::ACCESS_CONTROL_ALLOW_ORIGIN),
            set_cookies,
        };
        let bytes = response.body().await.expect("response body");
        exchange.body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        exchange
    });

    let mut ctx = world.borrow_mut();
    for raw in &exchange.set_cookies {
        ctx.absorb_set_cookie(raw);
    }
    ctx.last = Some(exchange);
}

/// Sign in as `subject` through the development token verifier.
pub(crate) fn sign_in(world: &SharedWorld, subject: &str) {
    send(
        world,
        Call::post(
            "/api/signin",
            serde_json::json!({ "accessToken": format!("dev:{subject}") }),
        ),
    );
    assert_eq!(world.borrow().last().status, 200, "sign-in succeeds");
}

/// Forget every cookie, as if a different browser were used.
pub(crate) fn switch_browser(world: &SharedWorld) {
    world.borrow_mut().cookies.clear();
}

struct Repositories {
    users: Arc<InMemoryUserRepository>,
    projects: Arc<InMemoryProjectRepository>,
    templates: Arc<InMemoryTemplateRepository>,
    shares: Arc<InMemoryPublishShareRepository>,
}

fn build_state(repos: &Repositories, key: &Key) -> HttpState {
    let clock = Arc::new(DefaultClock);
    let ports = HttpStatePorts {
        identity: Arc::new(FixtureIdentityVerifier),
        usernames: Arc::new(UsernameRegistryService::new(
            repos.users.clone(),
            clock.clone(),
        )),
        projects: Arc::new(ProjectCatalogService::new(
            repos.projects.clone(),
            repos.users.clone(),
            clock.clone(),
        )),
        templates: Arc::new(TemplateCatalogService::new(
            repos.templates.clone(),
            repos.shares.clone(),
            repos.users.clone(),
            clock.clone(),
        )),
        community: Arc::new(CommunityService::new(
            repos.projects.clone(),
            repos.users.clone(),
            repos.templates.clone(),
            clock.clone(),
        )),
    };
    let deploy = DeployRelaySettings {
        origin: OriginPolicy::default(),
        handoff_key: key.clone(),
        cookie_secure: false,
    };
    HttpState::new(ports, deploy, SignInSettings::default(), clock)
}

async fn spawn_portal_server(repos: &Repositories) -> Result<(String, ServerHandle), String> {
    let session = SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    };
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let http_state = web::Data::new(build_state(repos, &session.key));
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_state.clone())
            .app_data(health_state.clone())
            .wrap(AccessGate::new(http_state.usernames.clone()))
            .wrap(session_middleware(&session))
            .wrap(Trace)
            .service(ready)
            .service(live)
            .configure(configure_api)
            .configure(configure_pages)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

fn create_runtime_and_local() -> (Runtime, LocalSet) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    (runtime, LocalSet::new())
}

pub(crate) fn world() -> WorldFixture {
    let (runtime, local) = create_runtime_and_local();
    let repos = Repositories {
        users: Arc::default(),
        projects: Arc::default(),
        templates: Arc::default(),
        shares: Arc::default(),
    };
    let (base_url, server) = local
        .block_on(&runtime, spawn_portal_server(&repos))
        .expect("server starts");

    WorldFixture {
        world: Rc::new(RefCell::new(PortalWorld {
            runtime,
            local,
            base_url,
            server,
            users: repos.users,
            shares: repos.shares,
            cookies: BTreeMap::new(),
            last: None,
        })),
    }
}
