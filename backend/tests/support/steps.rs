//! Steps shared by the portal behaviour suites.

use actix_web::http::Method;
use rstest::fixture;
use rstest_bdd_macros::{given, then, when};
use serde_json::{Value, json};

use crate::harness::{self, Call, WorldFixture, send, sign_in, switch_browser};

#[fixture]
pub(crate) fn world() -> WorldFixture {
    harness::world()
}

#[given("a visitor signed in as {subject}")]
fn a_visitor_signed_in_as(world: &WorldFixture, subject: String) {
    sign_in(&world.world(), &subject);
}

#[given("a different visitor signed in as {subject}")]
fn a_different_visitor_signed_in_as(world: &WorldFixture, subject: String) {
    let world = world.world();
    switch_browser(&world);
    sign_in(&world, &subject);
}

#[when("the visitor signs in again as {subject}")]
fn the_visitor_signs_in_again_as(world: &WorldFixture, subject: String) {
    sign_in(&world.world(), &subject);
}

#[given("the visitor has claimed the username {username}")]
fn the_visitor_has_claimed_the_username(world: &WorldFixture, username: String) {
    let world = world.world();
    send(
        &world,
        Call::post("/api/setup-username", json!({ "username": username })),
    );
    assert_eq!(world.borrow().last().status, 200, "username claim succeeds");
}

#[given("the visitor signs out")]
fn the_visitor_signs_out(world: &WorldFixture) {
    let world = world.world();
    send(&world, Call::new(Method::POST, "/api/signout"));
    assert_eq!(world.borrow().last().status, 204);
}

#[when("the visitor opens {path}")]
fn the_visitor_opens(world: &WorldFixture, path: String) {
    send(&world.world(), Call::get(&path));
}

#[when("the visitor claims the username {username}")]
fn the_visitor_claims_the_username(world: &WorldFixture, username: String) {
    send(
        &world.world(),
        Call::post("/api/setup-username", json!({ "username": username })),
    );
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &WorldFixture, status: u16) {
    let world = world.world();
    let ctx = world.borrow();
    assert_eq!(ctx.last().status, status, "body: {}", ctx.last().body);
}

#[then("the response is an error with status {status} and code {code}")]
fn the_response_is_an_error(world: &WorldFixture, status: u16, code: String) {
    let world = world.world();
    let ctx = world.borrow();
    let last = ctx.last();
    assert_eq!(last.status, status, "body: {}", last.body);
    assert_eq!(
        last.body.get("code").and_then(Value::as_str),
        Some(code.as_str())
    );
    assert!(
        last.body.get("message").and_then(Value::as_str).is_some(),
        "error bodies carry a message"
    );
}

#[then("the response reports no username")]
fn the_response_reports_no_username(world: &WorldFixture) {
    let world = world.world();
    let ctx = world.borrow();
    assert_eq!(ctx.last().body.get("hasUsername"), Some(&json!(false)));
}
