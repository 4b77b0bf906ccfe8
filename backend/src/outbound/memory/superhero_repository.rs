//! Process-local `SuperheroRepository` used when no database is configured.
//!
//! Records sit in a vector behind an async `RwLock`, so insertion order is
//! creation order. Search tokenises text the same way for records and
//! queries and returns records holding at least one query token.

use async_trait::async_trait;
use superhero_model::{Superhero, SuperheroDraft, SuperheroId};
use tokio::sync::RwLock;

use crate::domain::ports::{SuperheroRepository, SuperheroRepositoryError};

/// In-memory superhero store.
#[derive(Debug, Default)]
pub struct InMemorySuperheroRepository {
    heroes: RwLock<Vec<Superhero>>,
}

impl InMemorySuperheroRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `heroes` in the given order.
    #[must_use]
    pub fn with_heroes(heroes: Vec<Superhero>) -> Self {
        Self {
            heroes: RwLock::new(heroes),
        }
    }
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

fn indexed_tokens(hero: &Superhero) -> Vec<String> {
    let mut out: Vec<String> = tokens(&hero.nickname)
        .chain(tokens(&hero.real_name))
        .collect();
    for text in hero
        .origin_description
        .iter()
        .chain(hero.catch_phrase.iter())
        .chain(hero.superpowers.iter())
    {
        out.extend(tokens(text));
    }
    out
}

fn matches_any(hero: &Superhero, terms: &[String]) -> bool {
    let indexed = indexed_tokens(hero);
    terms.iter().any(|term| indexed.contains(term))
}

fn saturating_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl SuperheroRepository for InMemorySuperheroRepository {
    async fn list(
        &self,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<Superhero>, SuperheroRepositoryError> {
        let heroes = self.heroes.read().await;
        Ok(heroes
            .iter()
            .skip(saturating_usize(offset))
            .take(saturating_usize(u64::from(limit)))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, SuperheroRepositoryError> {
        let len = self.heroes.read().await.len();
        u64::try_from(len).map_err(|err| SuperheroRepositoryError::query(err.to_string()))
    }

    async fn find_by_id(
        &self,
        id: &SuperheroId,
    ) -> Result<Option<Superhero>, SuperheroRepositoryError> {
        let heroes = self.heroes.read().await;
        Ok(heroes.iter().find(|hero| hero.id == *id).cloned())
    }

    async fn insert(&self, hero: &Superhero) -> Result<(), SuperheroRepositoryError> {
        let mut heroes = self.heroes.write().await;
        if heroes.iter().any(|existing| existing.id == hero.id) {
            return Err(SuperheroRepositoryError::query(format!(
                "duplicate superhero id {}",
                hero.id
            )));
        }
        heroes.push(hero.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: &SuperheroId,
        draft: &SuperheroDraft,
    ) -> Result<Option<Superhero>, SuperheroRepositoryError> {
        let mut heroes = self.heroes.write().await;
        Ok(heroes.iter_mut().find(|hero| hero.id == *id).map(|slot| {
            *slot = Superhero::from_draft(*id, draft.clone());
            slot.clone()
        }))
    }

    async fn delete(&self, id: &SuperheroId) -> Result<bool, SuperheroRepositoryError> {
        let mut heroes = self.heroes.write().await;
        let before = heroes.len();
        heroes.retain(|hero| hero.id != *id);
        Ok(heroes.len() != before)
    }

    async fn search(&self, query: &str) -> Result<Vec<Superhero>, SuperheroRepositoryError> {
        let terms: Vec<String> = tokens(query).collect();
        if terms.is_empty() {
            return Ok(Vec::new());
        }
        let heroes = self.heroes.read().await;
        Ok(heroes
            .iter()
            .filter(|hero| matches_any(hero, &terms))
            .cloned()
            .collect())
    }

    async fn clear(&self) -> Result<u64, SuperheroRepositoryError> {
        let mut heroes = self.heroes.write().await;
        let removed = heroes.len();
        heroes.clear();
        u64::try_from(removed).map_err(|err| SuperheroRepositoryError::query(err.to_string()))
    }
}
