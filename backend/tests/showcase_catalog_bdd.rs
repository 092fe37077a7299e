//! Behaviour tests for the project and template catalogues.
//!
//! Projects and templates are created through the HTTP API of a live server;
//! publish shares are staged directly in the in-memory share store, as the
//! external IDE would write them.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

// The harness carries fields other suites use.
#[allow(dead_code)]
#[path = "support/harness.rs"]
mod harness;
#[path = "support/steps.rs"]
mod steps;

use chrono::Utc;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};
use showcase::domain::PublishShare;
use uuid::Uuid;

use harness::{Call, SharedWorld, WorldFixture, send};
use steps::world;

fn add_project(world: &SharedWorld, template_type: &str, name: &str) {
    send(
        world,
        Call::post(
            "/api/add-project",
            json!({
                "name": name,
                "templateType": template_type,
                "description": "Behaviour fixture",
            }),
        ),
    );
}

#[given("the visitor added a {template_type} project named {name}")]
fn the_visitor_added_a_project(world: &WorldFixture, template_type: String, name: String) {
    let world = world.world();
    add_project(&world, &template_type, &name);
    assert_eq!(world.borrow().last().status, 201, "project created");
}

#[when("the visitor adds a {template_type} project named {name}")]
fn the_visitor_adds_a_project(world: &WorldFixture, template_type: String, name: String) {
    add_project(&world.world(), &template_type, &name);
}

#[when("the visitor adds a project without a template type")]
fn the_visitor_adds_a_project_without_a_template_type(world: &WorldFixture) {
    send(
        &world.world(),
        Call::post("/api/add-project", json!({ "name": "Orphan" })),
    );
}

#[given("the IDE staged share {share_id} with {template_type} code")]
fn the_ide_staged_share(world: &WorldFixture, share_id: String, template_type: String) {
    let world = world.world();
    world.borrow().shares.stage(PublishShare {
        id: Uuid::new_v4(),
        share_id,
        code: json!({ "files": { "contract.py": "def approval(): return Int(1)" } }),
        template_type,
        created_at: Utc::now(),
        expires_at: None,
    });
}

#[when("the visitor publishes share {share_id} as {title}")]
fn the_visitor_publishes_share(world: &WorldFixture, share_id: String, title: String) {
    send(
        &world.world(),
        Call::post(
            &format!("/api/publish/{share_id}"),
            json!({ "title": title, "description": "Starter vault" }),
        ),
    );
}

#[then("the project slug starts with {prefix}")]
fn the_project_slug_starts_with(world: &WorldFixture, prefix: String) {
    let world = world.world();
    let ctx = world.borrow();
    let slug = ctx
        .last()
        .body
        .get("slug")
        .and_then(Value::as_str)
        .expect("project slug");
    assert!(slug.starts_with(&prefix), "unexpected slug {slug}");
}

#[then("the listing contains {name} by {username}")]
fn the_listing_contains(world: &WorldFixture, name: String, username: String) {
    let world = world.world();
    let ctx = world.borrow();
    let listing = ctx.last().body.as_array().expect("contracts array");
    let entry = listing
        .iter()
        .find(|item| item.get("name").and_then(Value::as_str) == Some(name.as_str()))
        .expect("project listed");
    assert_eq!(
        entry.get("username").and_then(Value::as_str),
        Some(username.as_str())
    );
}

#[then("the template slug is {slug}")]
fn the_template_slug_is(world: &WorldFixture, slug: String) {
    let world = world.world();
    let ctx = world.borrow();
    let body = &ctx.last().body;
    assert_eq!(body.get("slug").and_then(Value::as_str), Some(slug.as_str()));
    assert_eq!(body.get("author").and_then(Value::as_str), Some("ada"));
}

#[then("the template has {views} views")]
fn the_template_has_views(world: &WorldFixture, views: i64) {
    let world = world.world();
    let ctx = world.borrow();
    assert_eq!(
        ctx.last().body.get("views").and_then(Value::as_i64),
        Some(views)
    );
}

#[then("{username} leads the leaderboard with {count} projects")]
fn leads_the_leaderboard(world: &WorldFixture, username: String, count: u64) {
    let world = world.world();
    let ctx = world.borrow();
    let body = &ctx.last().body;
    let leader = body.pointer("/topUsers/0").expect("leaderboard entry");
    assert_eq!(leader.get("rank"), Some(&json!(1)));
    assert_eq!(
        leader.get("username").and_then(Value::as_str),
        Some(username.as_str())
    );
    assert_eq!(
        leader.get("projectCount").and_then(Value::as_u64),
        Some(count)
    );
    assert_eq!(
        body.get("totalContracts").and_then(Value::as_u64),
        Some(count)
    );
}

#[scenario(path = "tests/features/showcase_catalog.feature")]
fn showcase_catalog_scenarios(world: WorldFixture) {
    drop(world);
}
