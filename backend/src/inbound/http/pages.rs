//! Page view models.
//!
//! Each page route returns the JSON a renderer needs; markup is out of scope.
//! These routes sit behind the access gate. Pages that need a signed-in
//! caller answer anonymous requests with a [`LoginPrompt`] instead of `401`,
//! so the shell can offer sign-in in place.

use actix_web::{HttpRequest, HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::domain::{
    BrowseQuery, DeployForm, Error, Identity, LEADERBOARD_PAGE_LIMIT, Leaderboard,
    MonthlyActivity, SharePreview, SortOrder, TemplateSummary, Username, browse,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::handoff_cookie;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{HttpState, SignInSettings};

/// Templates highlighted on the home page.
pub const FEATURED_TEMPLATES: usize = 3;

/// OAuth providers offered on the sign-in page.
pub const OAUTH_PROVIDERS: [&str; 3] = ["google", "github", "twitter"];

/// Placeholder for pages that need a signed-in caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPrompt {
    pub login_required: bool,
    pub sign_in_url: &'static str,
}

fn login_prompt() -> HttpResponse {
    HttpResponse::Ok().json(LoginPrompt {
        login_required: true,
        sign_in_url: "/signin",
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub signed_in: bool,
    pub featured_templates: Vec<TemplateSummary>,
    pub total_contracts: usize,
    pub this_month_count: usize,
}

#[get("/")]
pub async fn home(state: web::Data<HttpState>, session: SessionContext) -> web::Json<HomePage> {
    let mut featured = state.templates.list().await.unwrap_or_else(|error| {
        warn!(%error, "template listing failed; home page shows none");
        Vec::new()
    });
    featured.truncate(FEATURED_TEMPLATES);
    let totals = state
        .community
        .leaderboard(0)
        .await
        .unwrap_or_else(|error| {
            warn!(%error, "leaderboard query failed; home page shows zeros");
            Leaderboard::default()
        });
    web::Json(HomePage {
        signed_in: session.identity().is_some(),
        featured_templates: featured,
        total_contracts: totals.total_contracts,
        this_month_count: totals.this_month_count,
    })
}

/// `?q=&sort=&page=` for the contracts browser.
#[derive(Debug, Default, Deserialize)]
pub struct ContractsQuery {
    pub q: Option<String>,
    pub sort: Option<SortOrder>,
    pub page: Option<usize>,
}

impl From<ContractsQuery> for BrowseQuery {
    fn from(value: ContractsQuery) -> Self {
        Self {
            search: value.q,
            sort: value.sort.unwrap_or_default(),
            page: value.page.unwrap_or(1),
        }
    }
}

#[get("/contracts")]
pub async fn contracts_browser(
    state: web::Data<HttpState>,
    query: web::Query<ContractsQuery>,
) -> HttpResponse {
    let summaries = state.projects.list_public().await.unwrap_or_else(|error| {
        warn!(%error, "contract listing failed; browser shows none");
        Vec::new()
    });
    HttpResponse::Ok().json(browse(summaries, &BrowseQuery::from(query.into_inner())))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployPage {
    pub user: Identity,
    pub form: DeployForm,
}

/// Stage 2 of the deploy relay: pre-fill the project form from the handoff.
#[get("/deploy")]
pub async fn deploy_dashboard(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
) -> HttpResponse {
    let Some(identity) = session.identity() else {
        return login_prompt();
    };
    let handoff = handoff_cookie::open(&req, &state.deploy.handoff_key);
    let form = DeployForm::prefill(handoff, identity.id(), state.clock.utc());
    HttpResponse::Ok().json(DeployPage {
        user: identity,
        form,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardPage {
    #[serde(flatten)]
    pub leaderboard: Leaderboard,
    pub monthly: Vec<MonthlyActivity>,
}

#[get("/leaderboard")]
pub async fn leaderboard_page(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<LeaderboardPage>> {
    let leaderboard = state.community.leaderboard(LEADERBOARD_PAGE_LIMIT).await?;
    let monthly = state.community.monthly_activity().await?;
    Ok(web::Json(LeaderboardPage {
        leaderboard,
        monthly,
    }))
}

#[get("/profile")]
pub async fn own_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let Some(identity) = session.identity() else {
        return Ok(login_prompt());
    };
    let profile = state.community.own_profile(identity.id()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[get("/u/{username}")]
pub async fn public_profile(
    state: web::Data<HttpState>,
    username: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let username = Username::new(username.into_inner().to_lowercase())
        .map_err(|_| Error::not_found("User not found"))?;
    let profile = state.community.public_profile(&username).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[get("/templates/{slug}")]
pub async fn template_page(
    state: web::Data<HttpState>,
    slug: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let detail = state.templates.view(&slug).await?;
    Ok(HttpResponse::Ok().json(detail))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishPage {
    pub share: SharePreview,
    pub signed_in: bool,
}

#[get("/publish/{share_id}")]
pub async fn publish_page(
    state: web::Data<HttpState>,
    session: SessionContext,
    share_id: web::Path<String>,
) -> ApiResult<web::Json<PublishPage>> {
    let share = state.templates.preview_share(&share_id).await?;
    Ok(web::Json(PublishPage {
        share,
        signed_in: session.identity().is_some(),
    }))
}

#[get("/setup-username")]
pub async fn setup_username_page(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let Some(identity) = session.identity() else {
        return Ok(login_prompt());
    };
    let status = state.usernames.check(identity.id()).await?;
    Ok(HttpResponse::Ok().json(status))
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OAuthOption {
    pub provider: &'static str,
    pub authorize_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<&'static str>,
    pub providers: Vec<OAuthOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captcha_site_key: Option<String>,
}

/// Provider authorize URLs carrying the callback as `redirect_to`.
///
/// Empty when no provider URL is configured.
pub fn oauth_options(settings: &SignInSettings) -> Result<Vec<OAuthOption>, Error> {
    let Some(base) = settings.auth_provider_url.as_deref() else {
        return Ok(Vec::new());
    };
    let authorize = format!("{}/authorize", base.trim_end_matches('/'));
    let callback = settings.callback_url();
    OAUTH_PROVIDERS
        .into_iter()
        .map(|provider| {
            let mut url = Url::parse(&authorize)
                .map_err(|err| Error::internal(format!("invalid auth provider url: {err}")))?;
            url.query_pairs_mut()
                .append_pair("provider", provider)
                .append_pair("redirect_to", &callback);
            Ok(OAuthOption {
                provider,
                authorize_url: url.into(),
            })
        })
        .collect()
}

#[get("/signin")]
pub async fn sign_in_page(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SignInPage>> {
    if session.identity().is_some() {
        return Ok(web::Json(SignInPage {
            redirect_to: Some("/"),
            providers: Vec::new(),
            captcha_site_key: None,
        }));
    }
    Ok(web::Json(SignInPage {
        redirect_to: None,
        providers: oauth_options(&state.sign_in)?,
        captcha_site_key: state.sign_in.captcha_site_key.clone(),
    }))
}
