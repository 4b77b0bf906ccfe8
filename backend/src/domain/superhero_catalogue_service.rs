//! Catalogue use cases over the superhero repository.
//!
//! The service owns validation, id assignment and the mapping from storage
//! failures to domain errors. Storage adapters never see an invalid draft.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageInfo, PageRequest};
use superhero_model::{Superhero, SuperheroDraft, SuperheroId, first_violation};
use tracing::{debug, error, info};

use crate::domain::Error;
use crate::domain::ports::{SuperheroCatalogue, SuperheroRepository, SuperheroRepositoryError};

/// Message returned when a record does not exist.
pub const NOT_FOUND_MESSAGE: &str = "Superhero not found";

/// Message returned for a blank search query.
pub const EMPTY_QUERY_MESSAGE: &str = "Search query is required";

/// Catalogue service implementing [`SuperheroCatalogue`].
#[derive(Clone)]
pub struct SuperheroCatalogueService<R> {
    repository: Arc<R>,
}

impl<R> SuperheroCatalogueService<R> {
    /// Create a service backed by `repository`.
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_repository_error(operation: &'static str, err: &SuperheroRepositoryError) -> Error {
    error!(%err, operation, "superhero repository failed");
    let message = match err {
        SuperheroRepositoryError::Connection { .. } => {
            format!("Superhero store unavailable while trying to {operation}")
        }
        SuperheroRepositoryError::Query { .. } => format!("Failed to {operation}"),
    };
    Error::internal(message).caused_by(err)
}

fn validate(draft: &SuperheroDraft) -> Result<(), Error> {
    match first_violation(draft) {
        Some(violation) => {
            debug!(field = %violation.field, "superhero draft rejected");
            Err(Error::validation(violation))
        }
        None => Ok(()),
    }
}

#[async_trait]
impl<R> SuperheroCatalogue for SuperheroCatalogueService<R>
where
    R: SuperheroRepository,
{
    async fn list(&self, request: PageRequest) -> Result<Page<Superhero>, Error> {
        let data = self
            .repository
            .list(request.offset(), request.limit())
            .await
            .map_err(|err| map_repository_error("list superheroes", &err))?;
        let total = self
            .repository
            .count()
            .await
            .map_err(|err| map_repository_error("count superheroes", &err))?;
        Ok(Page::new(data, PageInfo::new(request, total)))
    }

    async fn get(&self, id: &SuperheroId) -> Result<Superhero, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|err| map_repository_error("fetch superhero", &err))?
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))
    }

    async fn create(&self, draft: SuperheroDraft) -> Result<Superhero, Error> {
        validate(&draft)?;
        let hero = Superhero::from_draft(SuperheroId::random(), draft);
        self.repository
            .insert(&hero)
            .await
            .map_err(|err| map_repository_error("create superhero", &err))?;
        info!(id = %hero.id, nickname = %hero.nickname, "superhero created");
        Ok(hero)
    }

    async fn update(&self, id: &SuperheroId, draft: SuperheroDraft) -> Result<Superhero, Error> {
        validate(&draft)?;
        let updated = self
            .repository
            .update(id, &draft)
            .await
            .map_err(|err| map_repository_error("update superhero", &err))?
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))?;
        info!(%id, "superhero updated");
        Ok(updated)
    }

    async fn delete(&self, id: &SuperheroId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(|err| map_repository_error("delete superhero", &err))?;
        if !removed {
            return Err(Error::not_found(NOT_FOUND_MESSAGE));
        }
        info!(%id, "superhero deleted");
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<Superhero>, Error> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::invalid_request(EMPTY_QUERY_MESSAGE));
        }
        self.repository
            .search(query)
            .await
            .map_err(|err| map_repository_error("search superheroes", &err))
    }
}

#[cfg(test)]
#[path = "superhero_catalogue_service_tests.rs"]
mod tests;
