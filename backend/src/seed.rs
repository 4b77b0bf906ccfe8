//! Sample roster used to populate an empty catalogue.

use superhero_model::{Superhero, SuperheroDraft, SuperheroId};
use tracing::info;

use crate::domain::ports::{SuperheroRepository, SuperheroRepositoryError};

/// The five sample heroes, in insertion order.
#[must_use]
pub fn roster() -> Vec<SuperheroDraft> {
    vec![
        SuperheroDraft::new(
            "Superman",
            "Clark Kent",
            [
                "Solar energy absorption",
                "Super strength",
                "Flight",
                "Invulnerability",
            ],
        )
        .with_origin_description("Born Kal-El on Krypton, rocketed to Earth as an infant...")
        .with_catch_phrase("Look, up in the sky, it's a bird, it's a plane, it's Superman!")
        .with_image("https://www.superherodb.com/pictures2/portraits/10/100/791.jpg"),
        SuperheroDraft::new(
            "Batman",
            "Bruce Wayne",
            [
                "Genius intellect",
                "Martial arts mastery",
                "Stealth",
                "High-tech gadgets",
            ],
        )
        .with_origin_description("After witnessing the murder of his parents...")
        .with_catch_phrase("I am Batman.")
        .with_image("https://www.superherodb.com/pictures2/portraits/10/100/639.jpg"),
        SuperheroDraft::new(
            "Wonder Woman",
            "Diana Prince",
            ["Super strength", "Agility", "Immortality", "Lasso of Truth"],
        )
        .with_origin_description("Amazonian princess gifted with powers by the Greek gods...")
        .with_catch_phrase("In the name of all that is good...")
        .with_image("https://www.superherodb.com/pictures2/portraits/10/100/807.jpg"),
        SuperheroDraft::new(
            "Spider-Man",
            "Peter Parker",
            [
                "Wall-crawling",
                "Spider-sense",
                "Superhuman reflexes",
                "Web-shooting",
            ],
        )
        .with_origin_description(
            "Bitten by a radioactive spider, gained arachnid-like abilities...",
        )
        .with_catch_phrase("With great power comes great responsibility!")
        .with_image("https://www.superherodb.com/pictures2/portraits/10/100/133.jpg"),
        SuperheroDraft::new(
            "Iron Man",
            "Tony Stark",
            [
                "Powered armor suit",
                "Flight",
                "Advanced weapons",
                "Genius inventor",
            ],
        )
        .with_origin_description("Billionaire genius who built a high-tech armored suit...")
        .with_catch_phrase("I am Iron Man.")
        .with_image("https://www.superherodb.com/pictures2/portraits/10/100/85.jpg"),
    ]
}

/// Replace every stored record with [`roster`].
///
/// Returns the number of records inserted.
///
/// # Errors
/// Propagates the first storage failure; records inserted before it remain.
pub async fn seed<R>(repository: &R) -> Result<usize, SuperheroRepositoryError>
where
    R: SuperheroRepository + ?Sized,
{
    let removed = repository.clear().await?;
    info!(removed, "cleared existing superheroes");

    let heroes: Vec<Superhero> = roster()
        .into_iter()
        .map(|draft| Superhero::from_draft(SuperheroId::random(), draft))
        .collect();
    for hero in &heroes {
        repository.insert(hero).await?;
    }
    info!(inserted = heroes.len(), "seeded superheroes");
    Ok(heroes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::memory::InMemorySuperheroRepository;
    use rstest::rstest;
    use superhero_model::validate_draft;

    #[rstest]
    fn roster_passes_validation() {
        for draft in roster() {
            assert!(
                validate_draft(&draft).is_empty(),
                "{} is invalid",
                draft.nickname
            );
        }
    }

    #[rstest]
    #[tokio::test]
    async fn seeding_replaces_existing_records() {
        let stale = Superhero::from_draft(
            SuperheroId::random(),
            SuperheroDraft::new("Stale", "Old Record", ["nothing"]),
        );
        let repo = InMemorySuperheroRepository::with_heroes(vec![stale.clone()]);

        let inserted = seed(&repo).await.expect("seed succeeds");

        assert_eq!(inserted, 5);
        assert_eq!(repo.count().await.expect("count"), 5);
        assert!(repo.find_by_id(&stale.id).await.expect("lookup").is_none());
        let first = repo.list(0, 1).await.expect("list");
        assert_eq!(
            first.first().map(|hero| hero.nickname.as_str()),
            Some("Superman")
        );
    }
}
