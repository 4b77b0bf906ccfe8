//! Diesel row types for the `superheroes` table.
//!
//! These structs never leave the persistence module; the repository converts
//! them to `superhero_model` types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use superhero_model::{Superhero, SuperheroDraft, SuperheroId};
use uuid::Uuid;

use super::schema::superheroes;

/// Row read from `superheroes`, also returned by raw search queries.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = superheroes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SuperheroRow {
    pub id: Uuid,
    pub nickname: String,
    pub real_name: String,
    pub origin_description: Option<String>,
    pub superpowers: Vec<String>,
    pub catch_phrase: Option<String>,
    pub images: Vec<String>,
}

impl From<SuperheroRow> for Superhero {
    fn from(row: SuperheroRow) -> Self {
        Self {
            id: SuperheroId::from_uuid(row.id),
            nickname: row.nickname,
            real_name: row.real_name,
            origin_description: row.origin_description,
            superpowers: row.superpowers,
            catch_phrase: row.catch_phrase,
            images: row.images,
        }
    }
}

/// Insertable row; timestamps come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = superheroes)]
pub(crate) struct NewSuperheroRow<'a> {
    pub id: Uuid,
    pub nickname: &'a str,
    pub real_name: &'a str,
    pub origin_description: Option<&'a str>,
    pub superpowers: &'a [String],
    pub catch_phrase: Option<&'a str>,
    pub images: &'a [String],
}

impl<'a> From<&'a Superhero> for NewSuperheroRow<'a> {
    fn from(hero: &'a Superhero) -> Self {
        Self {
            id: *hero.id.as_uuid(),
            nickname: &hero.nickname,
            real_name: &hero.real_name,
            origin_description: hero.origin_description.as_deref(),
            superpowers: &hero.superpowers,
            catch_phrase: hero.catch_phrase.as_deref(),
            images: &hero.images,
        }
    }
}

/// Full replacement of the mutable columns.
///
/// `None` clears the optional columns rather than leaving them untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = superheroes)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct SuperheroChangeset<'a> {
    pub nickname: &'a str,
    pub real_name: &'a str,
    pub origin_description: Option<&'a str>,
    pub superpowers: &'a [String],
    pub catch_phrase: Option<&'a str>,
    pub images: &'a [String],
    pub updated_at: DateTime<Utc>,
}

impl<'a> SuperheroChangeset<'a> {
    pub fn new(draft: &'a SuperheroDraft, updated_at: DateTime<Utc>) -> Self {
        Self {
            nickname: &draft.nickname,
            real_name: &draft.real_name,
            origin_description: draft.origin_description.as_deref(),
            superpowers: &draft.superpowers,
            catch_phrase: draft.catch_phrase.as_deref(),
            images: &draft.images,
            updated_at,
        }
    }
}
