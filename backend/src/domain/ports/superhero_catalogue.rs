//! Driving port for the superhero catalogue.
//!
//! HTTP handlers depend on this trait rather than on the service, so handler
//! tests can substitute a mock.

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use superhero_model::{Superhero, SuperheroDraft, SuperheroId};

use crate::domain::Error;

/// Catalogue use cases exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuperheroCatalogue: Send + Sync {
    /// One page of records with pagination metadata.
    async fn list(&self, request: PageRequest) -> Result<Page<Superhero>, Error>;

    /// A single record, or [`ErrorCode::NotFound`](crate::domain::ErrorCode::NotFound).
    async fn get(&self, id: &SuperheroId) -> Result<Superhero, Error>;

    /// Validate and store a new record under a fresh id.
    async fn create(&self, draft: SuperheroDraft) -> Result<Superhero, Error>;

    /// Validate and replace an existing record.
    async fn update(&self, id: &SuperheroId, draft: SuperheroDraft) -> Result<Superhero, Error>;

    /// Remove an existing record.
    async fn delete(&self, id: &SuperheroId) -> Result<(), Error>;

    /// Records matching any term of `query`.
    async fn search(&self, query: &str) -> Result<Vec<Superhero>, Error>;
}
