//! Tests for the domain error payload.

use super::*;
use rstest::rstest;
use serde_json::json;
use uuid::Uuid;

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("no"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("no"), ErrorCode::Forbidden)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_expected_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_substitutes_blank_messages() {
    let error = Error::new(ErrorCode::InternalError, "");
    assert_eq!(error.message(), "Unexpected error");
}

#[rstest]
fn trace_id_is_absent_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[tokio::test]
async fn trace_id_is_captured_in_scope() {
    let trace_id = TraceId::from_uuid(Uuid::nil());
    let error = TraceId::scope(trace_id, async { Error::not_found("gone") }).await;
    assert_eq!(error.trace_id(), Some(Uuid::nil().to_string().as_str()));
}

#[rstest]
fn serialises_camel_case_and_omits_empty_fields() {
    let error = Error::conflict("username already taken");
    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(
        value,
        json!({ "code": "conflict", "message": "username already taken" })
    );
}

#[rstest]
fn deserialises_details_and_trace_id() {
    let payload = json!({
        "code": "invalid_request",
        "message": "bad",
        "traceId": "abc",
        "details": { "field": "name" }
    });
    let error: Error = serde_json::from_value(payload).expect("deserialise error");
    assert_eq!(error.trace_id(), Some("abc"));
    assert_eq!(error.details(), Some(&json!({ "field": "name" })));
}

#[rstest]
fn deserialising_blank_message_fails() {
    let payload = json!({ "code": "internal_error", "message": " " });
    assert!(serde_json::from_value::<Error>(payload).is_err());
}
