//! Tests for the HTTP failure envelope.

use super::*;
use crate::middleware::Diagnostics;
use actix_web::body::to_bytes;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::Value;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[derive(Debug, thiserror::Error)]
#[error("relation \"superheroes\" does not exist")]
struct MissingTable;

#[fixture]
fn internal_error() -> Error {
    Error::internal("Failed to list superheroes")
        .caused_by(&MissingTable)
        .with_trace_id(TRACE_ID)
}

async fn body_json(error: &Error) -> Value {
    let response = ResponseError::error_response(error);
    let bytes = to_bytes(response.into_body()).await.expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

#[rstest]
fn redacted_envelope_hides_internal_details(internal_error: Error) {
    let envelope = ErrorEnvelope::from_error(&internal_error, ErrorDetail::Redacted);
    assert!(!envelope.success);
    assert_eq!(envelope.message, REDACTED_MESSAGE);
    assert_eq!(envelope.trace_id.as_deref(), Some(TRACE_ID));
    assert!(envelope.stack.is_none());
}

#[rstest]
fn verbose_envelope_keeps_message_and_stack(internal_error: Error) {
    let envelope = ErrorEnvelope::from_error(&internal_error, ErrorDetail::Verbose);
    assert_eq!(envelope.message, "Failed to list superheroes");
    let stack = envelope.stack.expect("stack present");
    assert!(stack.contains("caused by: relation \"superheroes\" does not exist"));
}

#[rstest]
fn client_errors_keep_their_message_when_redacted() {
    let err = Error::not_found("Superhero not found");
    let envelope = ErrorEnvelope::from_error(&err, ErrorDetail::Redacted);
    assert_eq!(envelope.message, "Superhero not found");
}

#[rstest]
#[actix_web::test]
async fn body_uses_camel_case_and_omits_empty_parts() {
    let err = Error::not_found("Superhero not found").with_trace_id(TRACE_ID);
    let body = body_json(&err).await;
    assert_eq!(
        body,
        serde_json::json!({
            "success": false,
            "code": "not_found",
            "message": "Superhero not found",
            "traceId": TRACE_ID,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn validation_errors_list_the_violation() {
    let err = Error::validation(Violation::new(
        "nickname",
        "Nickname must be at least 2 characters",
    ));
    let body = body_json(&err).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["errors"][0]["field"], "nickname");
    assert_eq!(
        body["errors"][0]["message"],
        "Nickname must be at least 2 characters"
    );
}

#[rstest]
#[actix_web::test]
async fn trace_header_mirrors_the_body(internal_error: Error) {
    let response = ResponseError::error_response(&internal_error);
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(TRACE_ID)
    );
}

async fn failing_handler() -> ApiResult<HttpResponse> {
    Err(Error::internal("Failed to list superheroes").caused_by(&MissingTable))
}

#[rstest]
#[case(ErrorDetail::Verbose, "Failed to list superheroes", true)]
#[case(ErrorDetail::Redacted, REDACTED_MESSAGE, false)]
#[actix_web::test]
async fn diagnostics_middleware_controls_exposure(
    #[case] detail: ErrorDetail,
    #[case] message: &str,
    #[case] has_stack: bool,
) {
    let app = actix_test::init_service(
        App::new()
            .wrap(Diagnostics::new(detail))
            .route("/", web::get().to(failing_handler)),
    )
    .await;
    let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], message);
    assert_eq!(body.get("stack").is_some(), has_stack);
}

#[rstest]
#[actix_web::test]
async fn malformed_json_maps_to_bad_request() {
    async fn echo(body: web::Json<Value>) -> HttpResponse {
        HttpResponse::Ok().json(body.into_inner())
    }
    let app = actix_test::init_service(
        App::new()
            .app_data(json_config())
            .route("/", web::post().to(echo)),
    )
    .await;
    let req = actix_test::TestRequest::post()
        .uri("/")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn unmatched_routes_use_the_envelope() {
    let app = actix_test::init_service(App::new().default_service(web::to(route_not_found))).await;
    let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/nope").to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "Route GET /nope not found");
}
