//! Client and page store driven against a live in-memory catalogue server.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::{HttpServer, web};
use backend::domain::SuperheroCatalogueService;
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::InMemorySuperheroRepository;
use backend::server::{AppDependencies, build_app};
use backend::settings::Mode;
use pagination::PageRequest;
use rstest::rstest;
use superhero_client::{ClientError, HeroForm, HeroStore, HttpSuperheroApi, SuperheroApi};
use superhero_model::{Superhero, SuperheroDraft, SuperheroId};

struct RunningServer {
    api: HttpSuperheroApi,
    handle: ServerHandle,
}

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

fn start(heroes: Vec<Superhero>) -> RunningServer {
    let repository = InMemorySuperheroRepository::with_heroes(heroes);
    let service = SuperheroCatalogueService::new(Arc::new(repository));
    let deps = AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(HttpState::new(Arc::new(service))),
        mode: Mode::Development,
        allowed_origins: Vec::new(),
    };
    let server = HttpServer::new(move || build_app(deps.clone()))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind ephemeral port");
    let addr = *server.addrs().first().expect("bound address");
    let running = server.run();
    let handle = running.handle();
    actix_web::rt::spawn(running);
    RunningServer {
        api: HttpSuperheroApi::new(format!("http://{addr}")),
        handle,
    }
}

fn batman() -> SuperheroDraft {
    SuperheroDraft::new("Batman", "Bruce Wayne", ["Genius intellect", "Stealth"])
        .with_catch_phrase("I am Batman.")
}

#[rstest]
#[actix_web::test]
async fn records_round_trip_through_the_api() {
    let server = start(Vec::new());

    let created = server.api.create(&batman()).await.expect("create");
    let fetched = server.api.get(&created.id).await.expect("get");
    assert_eq!(fetched, created);

    let edited = SuperheroDraft {
        catch_phrase: Some("I am vengeance.".to_owned()),
        ..batman()
    };
    let updated = server
        .api
        .update(&created.id, &edited)
        .await
        .expect("update");
    assert_eq!(updated.catch_phrase.as_deref(), Some("I am vengeance."));
    assert_eq!(updated.id, created.id);

    server.api.delete(&created.id).await.expect("delete");
    let err = server
        .api
        .get(&created.id)
        .await
        .expect_err("deleted record is gone");
    assert_eq!(err.status(), Some(404));

    server.handle.stop(false).await;
}

#[rstest]
#[actix_web::test]
async fn listing_reports_server_pagination() {
    let server = start(numbered_heroes(12));

    let page = server
        .api
        .list(PageRequest::new(3, 5).expect("valid request"))
        .await
        .expect("list");
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.pagination.total, 12);
    assert_eq!(page.pagination.pages, 3);

    server.handle.stop(false).await;
}

#[rstest]
#[actix_web::test]
async fn search_matches_any_term() {
    let server = start(Vec::new());
    server.api.create(&batman()).await.expect("create");
    server
        .api
        .create(&SuperheroDraft::new("Superman", "Clark Kent", ["Flight"]))
        .await
        .expect("create");

    let results = server.api.search("kent stealth").await.expect("search");
    let names: Vec<&str> = results.iter().map(|h| h.nickname.as_str()).collect();
    assert_eq!(names, vec!["Batman", "Superman"]);

    let misses = server.api.search("aquaman").await.expect("search");
    assert!(misses.is_empty());

    server.handle.stop(false).await;
}

#[rstest]
#[actix_web::test]
async fn unknown_records_surface_the_server_message() {
    let server = start(Vec::new());

    let err = server
        .api
        .delete(&SuperheroId::random())
        .await
        .expect_err("nothing to delete");
    let ClientError::Request { status, message, .. } = err else {
        panic!("expected a request failure, got {err:?}");
    };
    assert_eq!(status, 404);
    assert_eq!(message, "Superhero not found");

    server.handle.stop(false).await;
}

#[rstest]
#[actix_web::test]
async fn store_moves_to_the_page_holding_a_new_record() {
    let server = start(numbered_heroes(10));
    let mut store = HeroStore::new(server.api.clone());
    store.refresh().await.expect("refresh");
    assert_eq!(store.total_pages(), 2);

    let mut form = HeroForm::new();
    form.nickname = "Wonder Woman".to_owned();
    form.real_name = "Diana Prince".to_owned();
    form.superpowers = "Superhuman strength, Flight".to_owned();
    let draft = form.submit().expect("form is valid");
    let created = store.add_hero(&draft).await.expect("add");

    assert_eq!(store.current_page(), 3);
    assert_eq!(store.total(), 11);
    assert!(store.heroes().iter().any(|h| h.id == created.id));

    server.handle.stop(false).await;
}
