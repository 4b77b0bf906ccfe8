//! Behaviour of the domain error type.

use super::*;
use rstest::rstest;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
#[error("pool checkout timed out")]
struct PoolTimeout;

#[derive(Debug, ThisError)]
#[error("superhero lookup failed")]
struct LookupFailed(#[source] PoolTimeout);

#[rstest]
#[case(ErrorCode::InvalidRequest, "invalid_request")]
#[case(ErrorCode::NotFound, "not_found")]
#[case(ErrorCode::InternalError, "internal_error")]
fn codes_serialise_in_snake_case(#[case] code: ErrorCode, #[case] expected: &str) {
    let value = serde_json::to_value(code).expect("serialise code");
    assert_eq!(value, serde_json::Value::String(expected.to_owned()));
    assert_eq!(code.as_str(), expected);
}

#[rstest]
fn trace_id_is_absent_outside_a_request() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[tokio::test]
async fn trace_id_is_captured_from_scope() {
    let id = TraceId::generate();
    let err = TraceId::scope(id, async { Error::not_found("missing") }).await;
    assert_eq!(err.trace_id(), Some(id.to_string().as_str()));
}

#[rstest]
fn cause_chain_is_walked_outermost_first() {
    let source = LookupFailed(PoolTimeout);
    let err = Error::internal("Failed to load superheroes").caused_by(&source);
    assert_eq!(
        err.causes(),
        ["superhero lookup failed", "pool checkout timed out"]
    );
    assert_eq!(
        err.stack(),
        "internal_error: Failed to load superheroes\n    caused by: superhero lookup failed\n    caused by: pool checkout timed out"
    );
}

#[rstest]
fn validation_uses_the_violation_message() {
    let violation = Violation::at_index("images", 0, "Image 1 must be a valid URL");
    let err = Error::validation(violation.clone());
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "Image 1 must be a valid URL");
    assert_eq!(err.violations(), [violation]);
}
