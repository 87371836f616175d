//! Tests for the domain error payload and its wire contract.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
#[case(ErrorCode::InvalidRequest, "invalid_request")]
#[case(ErrorCode::NotFound, "not_found")]
#[case(ErrorCode::PersistenceFailed, "persistence_failed")]
#[case(ErrorCode::ReferenceGenerationFailed, "reference_generation_failed")]
#[case(ErrorCode::InternalError, "internal_error")]
fn error_codes_keep_their_wire_names(#[case] code: ErrorCode, #[case] expected: &str) {
    assert_eq!(code.as_str(), expected);
    let encoded = serde_json::to_value(code).expect("serialise code");
    assert_eq!(encoded, json!(expected));
}

#[rstest]
fn invalid_request_constructor_sets_code() {
    let err = Error::invalid_request("bad");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
fn new_substitutes_blank_messages() {
    let err = Error::new(ErrorCode::PersistenceFailed, "  ");
    assert_eq!(err.message(), "booking persistence failed");
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: Error) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn with_trace_id_ignores_blank_values(base_error: Error) {
    let err = base_error.with_trace_id("");
    assert!(err.trace_id().is_none());
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::persistence_failed("boom") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
#[tokio::test]
async fn deserialising_keeps_the_payload_trace(expected_trace_id: String) {
    let ambient = TraceId::generate();
    let decoded = TraceId::scope(ambient, async move {
        serde_json::from_value::<Error>(json!({
            "code": "not_found",
            "message": "missing",
        }))
        .expect("decode error payload")
    })
    .await;
    assert!(decoded.trace_id().is_none());

    let with_trace: Error = serde_json::from_value(json!({
        "code": "not_found",
        "message": "missing",
        "traceId": expected_trace_id,
    }))
    .expect("decode error payload");
    assert_eq!(with_trace.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_camel_case_payload(expected_trace_id: String) {
    let err = Error::invalid_request("bad")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"field": "origin", "code": "invalid_location"}));
    let value = serde_json::to_value(&err).expect("serialise error");
    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "message": "bad",
            "traceId": TRACE_ID,
            "details": {"field": "origin", "code": "invalid_location"},
        })
    );
}

#[rstest]
fn serialisation_omits_absent_optionals() {
    let value = serde_json::to_value(Error::not_found("missing")).expect("serialise error");
    assert_eq!(value, json!({"code": "not_found", "message": "missing"}));
}

#[rstest]
#[case(json!({"code": "not_found", "message": "  "}))]
#[case(json!({"code": "not_found", "message": "x", "traceId": " "}))]
#[case(json!({"code": "teapot", "message": "x"}))]
fn deserialisation_rejects_invalid_payloads(#[case] payload: serde_json::Value) {
    assert!(serde_json::from_value::<Error>(payload).is_err());
}
