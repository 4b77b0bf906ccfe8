//! End-to-end tests for the catalogue API over the in-memory store.

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use backend::domain::SuperheroCatalogueService;
use backend::domain::ports::{SuperheroRepository, SuperheroRepositoryError};
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::InMemorySuperheroRepository;
use backend::server::{AppDependencies, build_app};
use backend::settings::Mode;
use rstest::rstest;
use serde_json::{Value, json};
use superhero_model::{Superhero, SuperheroDraft, SuperheroId};

const SCOPE: &str = "/api/superheroes";

fn numbered_heroes(count: usize) -> Vec<Superhero> {
    (1..=count)
        .map(|n| {
            Superhero::from_draft(
                SuperheroId::random(),
                SuperheroDraft::new(format!("Hero {n}"), format!("Person {n}"), ["flight"]),
            )
        })
        .collect()
}

fn deps_over<R>(repository: R, mode: Mode) -> AppDependencies
where
    R: SuperheroRepository + 'static,
{
    let service = SuperheroCatalogueService::new(Arc::new(repository));
    AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(HttpState::new(Arc::new(service))),
        mode,
        allowed_origins: Vec::new(),
    }
}

async fn app_with(
    heroes: Vec<Superhero>,
) -> impl Service<Request, Response = ServiceResponse<impl actix_web::body::MessageBody>, Error = actix_web::Error>
{
    test::init_service(build_app(deps_over(
        InMemorySuperheroRepository::with_heroes(heroes),
        Mode::Development,
    )))
    .await
}

async fn send<S, B>(app: &S, request: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: actix_web::body::MessageBody,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let bytes = test::read_body(response).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn batman_body() -> Value {
    json!({
        "nickname": "Batman",
        "real_name": "Bruce Wayne",
        "origin_description": "After witnessing the murder of his parents...",
        "superpowers": ["Genius intellect", "Stealth"],
        "catch_phrase": "I am Batman.",
        "images": ["https://www.superherodb.com/pictures2/portraits/10/100/639.jpg"]
    })
}

#[rstest]
#[actix_web::test]
async fn default_listing_returns_the_first_five_of_twelve() {
    let heroes = numbered_heroes(12);
    let app = app_with(heroes.clone()).await;

    let (status, body) = send(&app, test::TestRequest::get().uri(SCOPE)).await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().expect("data array");
    assert_eq!(data.len(), 5);
    assert_eq!(data[0]["nickname"], "Hero 1");
    assert_eq!(
        body["pagination"],
        json!({"page": 1, "limit": 5, "total": 12, "pages": 3})
    );
}

#[rstest]
#[actix_web::test]
async fn last_page_holds_the_remainder() {
    let app = app_with(numbered_heroes(12)).await;

    let uri = format!("{SCOPE}?page=3&limit=5");
    let (_, body) = send(&app, test::TestRequest::get().uri(&uri)).await;

    let nicknames: Vec<&str> = body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .filter_map(|hero| hero["nickname"].as_str())
        .collect();
    assert_eq!(nicknames, vec!["Hero 11", "Hero 12"]);
}

#[rstest]
#[actix_web::test]
async fn page_past_the_end_is_empty_but_successful() {
    let app = app_with(numbered_heroes(3)).await;

    let uri = format!("{SCOPE}?page=9");
    let (status, body) = send(&app, test::TestRequest::get().uri(&uri)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["pagination"]["pages"], 1);
}

#[rstest]
#[case("limit=51", "limit")]
#[case("page=0", "page")]
#[case("page=-2", "page")]
#[actix_web::test]
async fn invalid_pagination_is_a_bad_request(#[case] query: &str, #[case] field: &str) {
    let app = app_with(Vec::new()).await;

    let uri = format!("{SCOPE}?{query}");
    let (status, body) = send(&app, test::TestRequest::get().uri(&uri)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], field);
}

#[rstest]
#[actix_web::test]
async fn created_record_round_trips() {
    let app = app_with(Vec::new()).await;

    let (status, created) = send(
        &app,
        test::TestRequest::post().uri(SCOPE).set_json(batman_body()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "Superhero created successfully");
    assert_eq!(created["data"]["nickname"], "Batman");
    let id = created["data"]["id"].as_str().expect("id").to_owned();

    let uri = format!("{SCOPE}/{id}");
    let (status, fetched) = send(&app, test::TestRequest::get().uri(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"], created["data"]);
}

#[rstest]
#[case(json!({"nickname": "B", "real_name": "Bruce Wayne", "superpowers": ["x"]}), "nickname")]
#[case(json!({"nickname": "Batman", "real_name": "Bruce Wayne", "superpowers": []}), "superpowers")]
#[case(json!({"nickname": "Batman", "real_name": "Bruce Wayne", "superpowers": ["x"], "images": ["not a url"]}), "images")]
#[actix_web::test]
async fn invalid_drafts_are_rejected_with_one_violation(#[case] draft: Value, #[case] field: &str) {
    let app = app_with(Vec::new()).await;

    let (status, body) = send(&app, test::TestRequest::post().uri(SCOPE).set_json(draft)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], field);

    let (_, listing) = send(&app, test::TestRequest::get().uri(SCOPE)).await;
    assert_eq!(listing["pagination"]["total"], 0);
}

#[rstest]
#[case("3fa85f64-5717-4562-b3fc-2c963f66afa6")]
#[case("not-a-uuid")]
#[actix_web::test]
async fn unknown_ids_are_not_found(#[case] id: &str) {
    let app = app_with(numbered_heroes(1)).await;

    let uri = format!("{SCOPE}/{id}");
    let (status, body) = send(&app, test::TestRequest::get().uri(&uri)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Superhero not found");
}

#[rstest]
#[actix_web::test]
async fn update_replaces_every_field() {
    let heroes = numbered_heroes(1);
    let id = heroes[0].id;
    let app = app_with(heroes).await;

    let uri = format!("{SCOPE}/{id}");
    let (status, body) = send(&app, test::TestRequest::put().uri(&uri).set_json(batman_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Superhero updated successfully");
    assert_eq!(body["data"]["id"], id.to_string());
    assert_eq!(body["data"]["real_name"], "Bruce Wayne");
}

#[rstest]
#[actix_web::test]
async fn delete_removes_the_record() {
    let heroes = numbered_heroes(2);
    let id = heroes[0].id;
    let app = app_with(heroes).await;

    let uri = format!("{SCOPE}/{id}");
    let (status, body) = send(&app, test::TestRequest::delete().uri(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Superhero deleted successfully");

    let (status, _) = send(&app, test::TestRequest::delete().uri(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listing) = send(&app, test::TestRequest::get().uri(SCOPE)).await;
    assert_eq!(listing["pagination"]["total"], 1);
}

#[rstest]
#[actix_web::test]
async fn search_matches_any_term_case_insensitively() {
    let app = app_with(Vec::new()).await;
    send(
        &app,
        test::TestRequest::post().uri(SCOPE).set_json(batman_body()),
    )
    .await;

    let uri = format!("{SCOPE}/search?q=BRUCE%20stealth");
    let (status, body) = send(&app, test::TestRequest::get().uri(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let uri = format!("{SCOPE}/search?q=aquaman%20flight");
    let (_, body) = send(&app, test::TestRequest::get().uri(&uri)).await;
    assert_eq!(body["data"], json!([]));
}

#[rstest]
#[case("/search")]
#[case("/search?q=%20%20")]
#[actix_web::test]
async fn blank_search_is_a_bad_request(#[case] path: &str) {
    let app = app_with(Vec::new()).await;

    let uri = format!("{SCOPE}{path}");
    let (status, body) = send(&app, test::TestRequest::get().uri(&uri)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Search query is required");
}

struct BrokenRepository;

fn broken() -> SuperheroRepositoryError {
    SuperheroRepositoryError::connection("connection refused")
}

#[async_trait::async_trait]
impl SuperheroRepository for BrokenRepository {
    async fn list(&self, _: u64, _: u32) -> Result<Vec<Superhero>, SuperheroRepositoryError> {
        Err(broken())
    }
    async fn count(&self) -> Result<u64, SuperheroRepositoryError> {
        Err(broken())
    }
    async fn find_by_id(
        &self,
        _: &SuperheroId,
    ) -> Result<Option<Superhero>, SuperheroRepositoryError> {
        Err(broken())
    }
    async fn insert(&self, _: &Superhero) -> Result<(), SuperheroRepositoryError> {
        Err(broken())
    }
    async fn update(
        &self,
        _: &SuperheroId,
        _: &SuperheroDraft,
    ) -> Result<Option<Superhero>, SuperheroRepositoryError> {
        Err(broken())
    }
    async fn delete(&self, _: &SuperheroId) -> Result<bool, SuperheroRepositoryError> {
        Err(broken())
    }
    async fn search(&self, _: &str) -> Result<Vec<Superhero>, SuperheroRepositoryError> {
        Err(broken())
    }
    async fn clear(&self) -> Result<u64, SuperheroRepositoryError> {
        Err(broken())
    }
}

#[rstest]
#[case(Mode::Development, true)]
#[case(Mode::Production, false)]
#[actix_web::test]
async fn storage_failures_are_redacted_in_production(
    #[case] mode: Mode,
    #[case] verbose: bool,
) {
    let app = test::init_service(build_app(deps_over(BrokenRepository, mode))).await;

    let (status, body) = send(&app, test::TestRequest::get().uri(SCOPE)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "internal_error");
    assert!(body["traceId"].is_string());
    assert_eq!(body.get("stack").is_some(), verbose);
    assert_eq!(body["message"] == "Internal Server Error", !verbose);
}

#[rstest]
#[actix_web::test]
async fn supplied_trace_id_is_echoed() {
    let app = test::init_service(build_app(deps_over(BrokenRepository, Mode::Production))).await;
    let trace = "7b7a3c5e-0c56-4c3a-9a43-0d3c0e2f1a11";

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(SCOPE)
            .insert_header(("trace-id", trace))
            .to_request(),
    )
    .await;

    assert_eq!(
        response
            .headers()
            .get("trace-id")
            .and_then(|value| value.to_str().ok()),
        Some(trace)
    );
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["traceId"], trace);
}
