//! Tests for error construction, trace capture, and serialisation.

use super::*;
use crate::domain::TraceId;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_substitutes_default_for_blank_message() {
    let error = Error::not_found("  ");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "not found");
}

#[rstest]
fn new_has_no_trace_id_outside_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::conflict("taken") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields() {
    let error = Error::conflict("phone number is already registered");
    let value = serde_json::to_value(&error).expect("serialise error");

    assert_eq!(
        value,
        json!({
            "code": "conflict",
            "message": "phone number is already registered",
        })
    );
}

#[rstest]
fn serialises_details_and_trace_id(expected_trace_id: String) {
    let error = Error::invalid_request("bad")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "field": "phone" }));
    let value = serde_json::to_value(&error).expect("serialise error");

    assert_eq!(value["traceId"], json!(expected_trace_id));
    assert_eq!(value["details"]["field"], json!("phone"));
}

#[rstest]
fn deserialising_blank_message_fails() {
    let result: Result<Error, _> =
        serde_json::from_value(json!({ "code": "not_found", "message": "  " }));
    assert!(result.is_err());
}
