//! Behavioural tests for offset pagination requests.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use pagination::{PageInfo, PageRequest, PaginationError};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

#[derive(Default, ScenarioState)]
struct World {
    total: Slot<u64>,
    outcome: Slot<Result<PageRequest, PaginationError>>,
}

impl World {
    fn accepted(&self) -> PageRequest {
        self.outcome
            .get()
            .expect("a request should have been made")
            .expect("request should be accepted")
    }

    fn info(&self) -> PageInfo {
        let total = self.total.get().expect("collection size should be set");
        PageInfo::new(self.accepted(), total)
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

#[given("a collection of {total:u64} records")]
fn a_collection_of_records(world: &World, total: u64) {
    world.total.set(total);
}

#[when("a client requests the default page")]
fn a_client_requests_the_default_page(world: &World) {
    world.outcome.set(PageRequest::parse(None, None));
}

#[when("a client requests page {page} with limit {limit}")]
fn a_client_requests_a_page(world: &World, page: String, limit: String) {
    world
        .outcome
        .set(PageRequest::parse(Some(page.as_str()), Some(limit.as_str())));
}

#[then("the request is accepted")]
fn the_request_is_accepted(world: &World) {
    let _ = world.accepted();
}

#[then("the page starts at offset {offset:u64}")]
fn the_page_starts_at_offset(world: &World, offset: u64) {
    assert_eq!(world.accepted().offset(), offset);
}

#[then("the collection spans {pages:u64} pages")]
fn the_collection_spans_pages(world: &World, pages: u64) {
    assert_eq!(world.info().pages, pages);
}

#[then("no later page exists")]
fn no_later_page_exists(world: &World) {
    assert!(!world.info().has_next());
}

#[then("the request is rejected for {field}")]
fn the_request_is_rejected_for(world: &World, field: String) {
    let outcome = world.outcome.get().expect("a request should have been made");
    let err = outcome.expect_err("request should be rejected");
    assert_eq!(err.field().as_str(), field);
}

#[scenario(
    path = "tests/features/pagination.feature",
    name = "Default request covers the first five records"
)]
fn default_request_covers_the_first_five_records(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/pagination.feature",
    name = "Last page of a partially filled collection"
)]
fn last_page_of_a_partially_filled_collection(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/pagination.feature",
    name = "Page size above the cap is rejected"
)]
fn page_size_above_the_cap_is_rejected(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/pagination.feature",
    name = "Page zero is rejected"
)]
fn page_zero_is_rejected(world: World) {
    let _ = world;
}
