//! HTTP inbound adapter: JSON API, page view models, and their helpers.
//!
//! [`configure_api`] and [`configure_pages`] register every handler so the
//! server and the integration tests mount an identical surface.

pub mod auth;
pub mod deploy;
pub mod error;
pub mod handoff_cookie;
pub mod health;
pub mod leaderboard;
pub mod pages;
pub mod projects;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod templates;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the `/api` routes.
///
/// `/api/templates/user` is registered ahead of `/api/templates/{slug}` so
/// the literal segment wins.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::sign_in)
        .service(auth::sign_out)
        .service(auth::oauth_callback)
        .service(auth::auth_callback)
        .service(users::check_username)
        .service(users::claim_username)
        .service(projects::add_project)
        .service(projects::list_my_projects)
        .service(projects::list_all_projects)
        .service(projects::list_contracts)
        .service(templates::list_templates)
        .service(templates::list_my_templates)
        .service(templates::get_template)
        .service(templates::preview_share)
        .service(templates::publish_template)
        .service(deploy::deploy_preflight)
        .service(deploy::stage_deployment)
        .service(leaderboard::get_leaderboard);
}

/// Register the page view-model routes.
pub fn configure_pages(cfg: &mut web::ServiceConfig) {
    cfg.service(pages::home)
        .service(pages::contracts_browser)
        .service(pages::deploy_dashboard)
        .service(pages::leaderboard_page)
        .service(pages::own_profile)
        .service(pages::public_profile)
        .service(pages::template_page)
        .service(pages::publish_page)
        .service(pages::setup_username_page)
        .service(pages::sign_in_page);
}
