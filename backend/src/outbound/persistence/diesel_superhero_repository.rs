//! PostgreSQL-backed `SuperheroRepository` using Diesel.
//!
//! Listings are ordered by `(created_at, id)` so offset pagination is stable.
//! Search uses PostgreSQL full-text matching: query words are joined with `|`
//! so any one of them matches, and the document covers every text column.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;
use superhero_model::{Superhero, SuperheroDraft, SuperheroId};
use tracing::debug;

use crate::domain::ports::{SuperheroRepository, SuperheroRepositoryError};

use super::models::{NewSuperheroRow, SuperheroChangeset, SuperheroRow};
use super::pool::{DbPool, PoolError};
use super::schema::superheroes;

const SEARCH_SQL: &str = "\
SELECT id, nickname, real_name, origin_description, superpowers, catch_phrase, images \
FROM superheroes \
WHERE to_tsvector('english', \
    nickname || ' ' || real_name || ' ' || \
    coalesce(origin_description, '') || ' ' || \
    coalesce(catch_phrase, '') || ' ' || \
    array_to_string(superpowers, ' ')) \
  @@ to_tsquery('english', $1) \
ORDER BY created_at, id";

/// Join the query's words with `|` so a record matching any one of them is
/// returned. Only alphanumeric runs survive, which keeps `to_tsquery`
/// operators out of user input.
fn any_term_tsquery(query: &str) -> Option<String> {
    let terms: Vec<&str> = query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|term| !term.is_empty())
        .collect();
    (!terms.is_empty()).then(|| terms.join(" | "))
}

/// Diesel-backed implementation of the `SuperheroRepository` port.
#[derive(Clone)]
pub struct DieselSuperheroRepository {
    pool: DbPool,
}

impl DieselSuperheroRepository {
    /// Create a repository over the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SuperheroRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            SuperheroRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> SuperheroRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            SuperheroRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            SuperheroRepositoryError::query("duplicate superhero id")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            SuperheroRepositoryError::query("superhero row violates a table constraint")
        }
        DieselError::DeserializationError(_) => {
            SuperheroRepositoryError::query("superhero row could not be decoded")
        }
        _ => SuperheroRepositoryError::query("database error"),
    }
}

fn to_count(value: i64) -> Result<u64, SuperheroRepositoryError> {
    u64::try_from(value)
        .map_err(|_| SuperheroRepositoryError::query(format!("negative row count {value}")))
}

fn to_row_count(value: usize) -> Result<u64, SuperheroRepositoryError> {
    u64::try_from(value).map_err(|err| SuperheroRepositoryError::query(err.to_string()))
}

#[async_trait]
impl SuperheroRepository for DieselSuperheroRepository {
    async fn list(
        &self,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<Superhero>, SuperheroRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);

        let rows: Vec<SuperheroRow> = superheroes::table
            .order((superheroes::created_at.asc(), superheroes::id.asc()))
            .offset(offset)
            .limit(i64::from(limit))
            .select(SuperheroRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Superhero::from).collect())
    }

    async fn count(&self) -> Result<u64, SuperheroRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = superheroes::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_count(total)
    }

    async fn find_by_id(
        &self,
        id: &SuperheroId,
    ) -> Result<Option<Superhero>, SuperheroRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<SuperheroRow> = superheroes::table
            .find(id.as_uuid())
            .select(SuperheroRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Superhero::from))
    }

    async fn insert(&self, hero: &Superhero) -> Result<(), SuperheroRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(superheroes::table)
            .values(NewSuperheroRow::from(hero))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        id: &SuperheroId,
        draft: &SuperheroDraft,
    ) -> Result<Option<Superhero>, SuperheroRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<SuperheroRow> = diesel::update(superheroes::table.find(id.as_uuid()))
            .set(SuperheroChangeset::new(draft, Utc::now()))
            .returning(SuperheroRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Superhero::from))
    }

    async fn delete(&self, id: &SuperheroId) -> Result<bool, SuperheroRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(superheroes::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }

    async fn search(&self, query: &str) -> Result<Vec<Superhero>, SuperheroRepositoryError> {
        let Some(tsquery) = any_term_tsquery(query) else {
            return Ok(Vec::new());
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<SuperheroRow> = sql_query(SEARCH_SQL)
            .bind::<Text, _>(tsquery)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Superhero::from).collect())
    }

    async fn clear(&self) -> Result<u64, SuperheroRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(superheroes::table)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_row_count(removed)
    }
}
