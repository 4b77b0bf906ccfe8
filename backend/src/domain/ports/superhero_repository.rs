//! Driven port for superhero storage.
//!
//! Adapters own ordering and text matching: listings come back in creation
//! order and `search` returns records whose indexed text contains any term
//! of the query, ignoring case.

use async_trait::async_trait;
use superhero_model::{Superhero, SuperheroDraft, SuperheroId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by superhero storage adapters.
    pub enum SuperheroRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "superhero store connection failed: {message}",
        /// A query failed during execution or row conversion.
        Query { message: String } =>
            "superhero store query failed: {message}",
    }
}

/// Persistence operations over superhero records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuperheroRepository: Send + Sync {
    /// Return up to `limit` records after skipping `offset`, in creation order.
    async fn list(&self, offset: u64, limit: u32)
    -> Result<Vec<Superhero>, SuperheroRepositoryError>;

    /// Total number of stored records.
    async fn count(&self) -> Result<u64, SuperheroRepositoryError>;

    /// Look up one record.
    async fn find_by_id(
        &self,
        id: &SuperheroId,
    ) -> Result<Option<Superhero>, SuperheroRepositoryError>;

    /// Store a new record. The id is assigned by the caller.
    async fn insert(&self, hero: &Superhero) -> Result<(), SuperheroRepositoryError>;

    /// Replace every mutable field of an existing record.
    ///
    /// Returns `None` when no record has the given id.
    async fn update(
        &self,
        id: &SuperheroId,
        draft: &SuperheroDraft,
    ) -> Result<Option<Superhero>, SuperheroRepositoryError>;

    /// Remove a record, reporting whether it existed.
    async fn delete(&self, id: &SuperheroId) -> Result<bool, SuperheroRepositoryError>;

    /// Full-text search. `query` is already trimmed and non-empty.
    async fn search(&self, query: &str) -> Result<Vec<Superhero>, SuperheroRepositoryError>;

    /// Remove every record, returning how many were deleted.
    async fn clear(&self) -> Result<u64, SuperheroRepositoryError>;
}
