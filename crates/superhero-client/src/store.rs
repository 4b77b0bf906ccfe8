//! Page-at-a-time view of the catalogue.
//!
//! The store holds only what the server last confirmed. Every mutation is
//! followed by a refetch of the current page, and the page is moved when the
//! mutation changes how many pages exist.

use pagination::{PageInfo, PageRequest, clamp_page, page_count};
use superhero_model::{Superhero, SuperheroDraft, SuperheroId};
use tracing::debug;

use crate::{ClientError, SuperheroApi};

/// Client-side state for one paginated listing.
#[derive(Debug)]
pub struct HeroStore<A> {
    api: A,
    request: PageRequest,
    heroes: Vec<Superhero>,
    total: u64,
    loading: bool,
    error: Option<ClientError>,
}

impl<A> HeroStore<A> {
    /// Store on page 1 with the default page size.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self::with_request(api, PageRequest::default())
    }

    /// Store starting at `request`.
    #[must_use]
    pub const fn with_request(api: A, request: PageRequest) -> Self {
        Self {
            api,
            request,
            heroes: Vec::new(),
            total: 0,
            loading: false,
            error: None,
        }
    }

    /// Records on the current page.
    #[must_use]
    pub fn heroes(&self) -> &[Superhero] {
        &self.heroes
    }

    /// Whether a round trip is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Current 1-based page.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.request.page()
    }

    /// Records per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.request.limit()
    }

    /// Records across all pages, as last reported.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// `ceil(total / page_size)`.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        page_count(self.total, self.request.limit())
    }

    /// Position of the current page.
    #[must_use]
    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(self.request, self.total)
    }

    /// Failure of the most recent operation, if it failed.
    #[must_use]
    pub const fn error(&self) -> Option<&ClientError> {
        self.error.as_ref()
    }

    /// The underlying adapter.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    fn record<T>(&mut self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        match &result {
            Ok(_) => self.error = None,
            Err(err) => self.error = Some(err.clone()),
        }
        result
    }
}

impl<A> HeroStore<A>
where
    A: SuperheroApi,
{
    async fn fetch(&mut self) -> Result<(), ClientError> {
        self.loading = true;
        let result = self.api.list(self.request).await;
        self.loading = false;
        let page = result?;
        self.total = page.pagination.total;
        self.heroes = page.data;
        Ok(())
    }

    async fn move_to(&mut self, page: u32) -> Result<(), ClientError> {
        self.request = self.request.with_page(page)?;
        self.fetch().await
    }

    /// Refetch the current page.
    ///
    /// # Errors
    /// Returns the adapter failure; the previous page stays in place.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let result = self.fetch().await;
        self.record(result)
    }

    /// Switch to page `page` and fetch it.
    ///
    /// # Errors
    /// Rejects page 0 locally; otherwise returns the adapter failure.
    pub async fn set_page(&mut self, page: u32) -> Result<(), ClientError> {
        let result = self.move_to(page).await;
        self.record(result)
    }

    async fn add(&mut self, draft: &SuperheroDraft) -> Result<Superhero, ClientError> {
        let created = self.api.create(draft).await?;
        self.fetch().await?;
        let last = clamp_page(u32::MAX, self.total_pages());
        if last > self.current_page() {
            debug!(page = last, "jumping to the page holding the new record");
            self.move_to(last).await?;
        }
        Ok(created)
    }

    /// Create a record, then show the last page where it lands.
    ///
    /// # Errors
    /// Returns local validation failures or the adapter failure.
    pub async fn add_hero(&mut self, draft: &SuperheroDraft) -> Result<Superhero, ClientError> {
        let result = self.add(draft).await;
        self.record(result)
    }

    async fn replace(
        &mut self,
        id: &SuperheroId,
        draft: &SuperheroDraft,
    ) -> Result<Superhero, ClientError> {
        let updated = self.api.update(id, draft).await?;
        self.fetch().await?;
        Ok(updated)
    }

    /// Update a record, then refetch the current page.
    ///
    /// # Errors
    /// Returns local validation failures or the adapter failure.
    pub async fn update_hero(
        &mut self,
        id: &SuperheroId,
        draft: &SuperheroDraft,
    ) -> Result<Superhero, ClientError> {
        let result = self.replace(id, draft).await;
        self.record(result)
    }

    async fn remove(&mut self, id: &SuperheroId) -> Result<(), ClientError> {
        self.api.delete(id).await?;
        self.fetch().await?;
        let pages = self.total_pages();
        if pages > 0 && u64::from(self.current_page()) > pages {
            let last = clamp_page(self.current_page(), pages);
            debug!(page = last, "current page emptied; moving to the last page");
            self.move_to(last).await?;
        }
        Ok(())
    }

    /// Delete a record, then refetch, stepping back if the page emptied.
    ///
    /// # Errors
    /// Returns the adapter failure.
    pub async fn delete_hero(&mut self, id: &SuperheroId) -> Result<(), ClientError> {
        let result = self.remove(id).await;
        self.record(result)
    }

    /// Fetch one record without touching the listing.
    ///
    /// # Errors
    /// Returns the adapter failure.
    pub async fn fetch_hero(&mut self, id: &SuperheroId) -> Result<Superhero, ClientError> {
        let result = self.api.get(id).await;
        self.record(result)
    }

    /// Run a search without touching the listing.
    ///
    /// # Errors
    /// Returns the adapter failure, including a blank query.
    pub async fn search(&mut self, query: &str) -> Result<Vec<Superhero>, ClientError> {
        let result = self.api.search(query).await;
        self.record(result)
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pagination::Page;
    use rstest::{fixture, rstest};
    use std::sync::Mutex;
    use superhero_model::validate_draft;

    /// In-process stand-in for the server with the same paging rules.
    #[derive(Default)]
    struct FakeApi {
        heroes: Mutex<Vec<Superhero>>,
    }

    impl FakeApi {
        fn with(count: usize) -> Self {
            let heroes = (1..=count)
                .map(|n| {
                    Superhero::from_draft(
                        SuperheroId::random(),
                        SuperheroDraft::new(format!("Hero {n}"), "Someone", ["flight"]),
                    )
                })
                .collect();
            Self {
                heroes: Mutex::new(heroes),
            }
        }

        fn ids(&self) -> Vec<SuperheroId> {
            self.heroes
                .lock()
                .expect("lock")
                .iter()
                .map(|hero| hero.id)
                .collect()
        }
    }

    fn not_found() -> ClientError {
        ClientError::Request {
            status: 404,
            message: "Superhero not found".to_owned(),
            violations: Vec::new(),
        }
    }

    #[async_trait]
    impl SuperheroApi for FakeApi {
        async fn list(&self, request: PageRequest) -> Result<Page<Superhero>, ClientError> {
            let heroes = self.heroes.lock().expect("lock");
            let offset = usize::try_from(request.offset()).expect("offset fits");
            let limit = usize::try_from(request.limit()).expect("limit fits");
            let data = heroes.iter().skip(offset).take(limit).cloned().collect();
            let total = u64::try_from(heroes.len()).expect("total fits");
            Ok(Page::new(data, PageInfo::new(request, total)))
        }

        async fn get(&self, id: &SuperheroId) -> Result<Superhero, ClientError> {
            let heroes = self.heroes.lock().expect("lock");
            heroes
                .iter()
                .find(|hero| hero.id == *id)
                .cloned()
                .ok_or_else(not_found)
        }

        async fn create(&self, draft: &SuperheroDraft) -> Result<Superhero, ClientError> {
            let violations = validate_draft(draft);
            if !violations.is_empty() {
                return Err(ClientError::Validation(violations));
            }
            let hero = Superhero::from_draft(SuperheroId::random(), draft.clone());
            self.heroes.lock().expect("lock").push(hero.clone());
            Ok(hero)
        }

        async fn update(
            &self,
            id: &SuperheroId,
            draft: &SuperheroDraft,
        ) -> Result<Superhero, ClientError> {
            let mut heroes = self.heroes.lock().expect("lock");
            let slot = heroes
                .iter_mut()
                .find(|hero| hero.id == *id)
                .ok_or_else(not_found)?;
            *slot = Superhero::from_draft(*id, draft.clone());
            Ok(slot.clone())
        }

        async fn delete(&self, id: &SuperheroId) -> Result<(), ClientError> {
            let mut heroes = self.heroes.lock().expect("lock");
            let before = heroes.len();
            heroes.retain(|hero| hero.id != *id);
            if heroes.len() == before {
                return Err(not_found());
            }
            Ok(())
        }

        async fn search(&self, query: &str) -> Result<Vec<Superhero>, ClientError> {
            let needle = query.to_lowercase();
            let heroes = self.heroes.lock().expect("lock");
            Ok(heroes
                .iter()
                .filter(|hero| hero.nickname.to_lowercase().contains(&needle))
                .cloned()
                .collect())
        }
    }

    #[fixture]
    fn new_hero() -> SuperheroDraft {
        SuperheroDraft::new("Storm", "Ororo Munroe", ["weather control"])
    }

    #[rstest]
    #[tokio::test]
    async fn refresh_loads_the_first_page() {
        let mut store = HeroStore::new(FakeApi::with(12));
        store.refresh().await.expect("refresh");

        assert_eq!(store.heroes().len(), 5);
        assert_eq!(store.total(), 12);
        assert_eq!(store.total_pages(), 3);
        assert!(!store.is_loading());
        assert!(store.error().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn page_zero_is_rejected_and_kept_as_last_error() {
        let mut store = HeroStore::new(FakeApi::with(3));
        let err = store.set_page(0).await.expect_err("page 0");

        assert!(err.violations().iter().any(|v| v.is_for("page")));
        assert_eq!(store.error(), Some(&err));
        assert_eq!(store.current_page(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn adding_jumps_to_the_page_holding_the_new_record(new_hero: SuperheroDraft) {
        let mut store = HeroStore::new(FakeApi::with(5));
        store.refresh().await.expect("refresh");

        let created = store.add_hero(&new_hero).await.expect("create");

        assert_eq!(store.current_page(), 2);
        assert_eq!(store.total_pages(), 2);
        assert_eq!(store.heroes(), std::slice::from_ref(&created));
    }

    #[rstest]
    #[tokio::test]
    async fn adding_within_the_last_page_stays_put(new_hero: SuperheroDraft) {
        let mut store = HeroStore::new(FakeApi::with(2));
        store.refresh().await.expect("refresh");

        store.add_hero(&new_hero).await.expect("create");

        assert_eq!(store.current_page(), 1);
        assert_eq!(store.heroes().len(), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_the_sole_record_on_the_last_page_clamps_to_the_new_last_page() {
        let api = FakeApi::with(11);
        let last_id = *api.ids().last().expect("eleven records");
        let mut store = HeroStore::new(api);
        store.set_page(3).await.expect("page 3");
        assert_eq!(store.heroes().len(), 1);

        store.delete_hero(&last_id).await.expect("delete");

        assert_eq!(store.total_pages(), 2);
        assert_eq!(store.current_page(), 2);
        assert_eq!(store.heroes().len(), 5);
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_the_only_record_leaves_page_one_empty() {
        let api = FakeApi::with(1);
        let id = *api.ids().first().expect("one record");
        let mut store = HeroStore::new(api);
        store.refresh().await.expect("refresh");

        store.delete_hero(&id).await.expect("delete");

        assert_eq!(store.current_page(), 1);
        assert_eq!(store.total_pages(), 0);
        assert!(store.heroes().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn failed_update_keeps_the_page_and_records_the_error(new_hero: SuperheroDraft) {
        let mut store = HeroStore::new(FakeApi::with(2));
        store.refresh().await.expect("refresh");
        let before = store.heroes().to_vec();

        let err = store
            .update_hero(&SuperheroId::random(), &new_hero)
            .await
            .expect_err("unknown id");

        assert_eq!(err.status(), Some(404));
        assert_eq!(store.heroes(), before.as_slice());
        assert!(store.error().is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn update_refetches_the_current_page(new_hero: SuperheroDraft) {
        let api = FakeApi::with(2);
        let id = *api.ids().first().expect("records");
        let mut store = HeroStore::new(api);
        store.refresh().await.expect("refresh");

        store.update_hero(&id, &new_hero).await.expect("update");

        assert_eq!(
            store.heroes().first().map(|hero| hero.nickname.as_str()),
            Some("Storm")
        );
    }
}
