//! Plain-text renderings of catalogue state.
//!
//! Each view borrows what it shows and implements [`fmt::Display`], so the
//! CLI can write it to any stream.

use std::fmt;

use pagination::PageInfo;
use superhero_model::Superhero;

use crate::HeroForm;

/// One page of records with a pagination footer.
#[derive(Debug, Clone, Copy)]
pub struct ListView<'a> {
    heroes: &'a [Superhero],
    info: PageInfo,
}

impl<'a> ListView<'a> {
    /// View of `heroes` positioned by `info`.
    #[must_use]
    pub const fn new(heroes: &'a [Superhero], info: PageInfo) -> Self {
        Self { heroes, info }
    }
}

impl fmt::Display for ListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.info.total == 0 {
            return writeln!(f, "No superheroes yet.");
        }
        let first = u64::from(self.info.page.saturating_sub(1)) * u64::from(self.info.limit);
        for (position, hero) in (first + 1..).zip(self.heroes) {
            writeln!(f, "{position:>3}. {}  ({})", hero.nickname, hero.id)?;
        }
        if self.heroes.is_empty() {
            writeln!(f, "  (this page is empty)")?;
        }
        write!(
            f,
            "Page {} of {} · {} total",
            self.info.page,
            self.info.pages.max(1),
            self.info.total
        )?;
        if self.info.has_previous() {
            write!(f, " · prev: {}", self.info.page.saturating_sub(1))?;
        }
        if self.info.has_next() {
            write!(f, " · next: {}", self.info.page.saturating_add(1))?;
        }
        writeln!(f)
    }
}

/// Every field of one record.
#[derive(Debug, Clone, Copy)]
pub struct DetailView<'a>(pub &'a Superhero);

impl fmt::Display for DetailView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hero = self.0;
        writeln!(f, "{}", hero.nickname)?;
        writeln!(f, "  id:           {}", hero.id)?;
        writeln!(f, "  real name:    {}", hero.real_name)?;
        if let Some(origin) = &hero.origin_description {
            writeln!(f, "  origin:       {origin}")?;
        }
        writeln!(f, "  superpowers:  {}", hero.superpowers.join(", "))?;
        if let Some(phrase) = &hero.catch_phrase {
            writeln!(f, "  catch phrase: \"{phrase}\"")?;
        }
        for url in &hero.images {
            writeln!(f, "  image:        {url}")?;
        }
        Ok(())
    }
}

/// Search outcome for one query.
#[derive(Debug, Clone, Copy)]
pub struct SearchView<'a> {
    query: &'a str,
    results: &'a [Superhero],
}

impl<'a> SearchView<'a> {
    /// View of `results` for `query`.
    #[must_use]
    pub const fn new(query: &'a str, results: &'a [Superhero]) -> Self {
        Self { query, results }
    }
}

impl fmt::Display for SearchView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.results.len() {
            0 => return writeln!(f, "No superheroes match \"{}\".", self.query),
            1 => writeln!(f, "1 match for \"{}\":", self.query)?,
            n => writeln!(f, "{n} matches for \"{}\":", self.query)?,
        }
        for hero in self.results {
            writeln!(f, "  {} ({})  {}", hero.nickname, hero.real_name, hero.id)?;
        }
        Ok(())
    }
}

/// Error listing for a rejected form.
#[derive(Debug, Clone, Copy)]
pub struct FormErrorsView<'a>(pub &'a HeroForm);

impl fmt::Display for FormErrorsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, messages) in self.0.errors() {
            for message in messages {
                writeln!(f, "  {field}: {message}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    use super::*;
    use pagination::PageRequest;
    use rstest::{fixture, rstest};
    use superhero_model::{SuperheroDraft, SuperheroId};

    #[fixture]
    fn superman() -> Superhero {
        Superhero::from_draft(
            SuperheroId::random(),
            SuperheroDraft::new("Superman", "Clark Kent", ["flight", "super strength"])
                .with_catch_phrase("Up, up and away!"),
        )
    }

    fn info(page: u32, total: u64) -> PageInfo {
        PageInfo::new(PageRequest::new(page, 5).expect("valid request"), total)
    }

    #[rstest]
    fn list_numbers_records_across_pages(superman: Superhero) {
        let heroes = [superman];
        let text = ListView::new(&heroes, info(2, 6)).to_string();
        assert!(text.contains("  6. Superman"));
        assert!(text.contains("Page 2 of 2 · 6 total · prev: 1"));
        assert!(!text.contains("next:"));
    }

    #[rstest]
    fn empty_catalogue_says_so() {
        assert_eq!(ListView::new(&[], info(1, 0)).to_string(), "No superheroes yet.\n");
    }

    #[rstest]
    fn detail_skips_absent_fields(superman: Superhero) {
        let text = DetailView(&superman).to_string();
        assert!(text.contains("superpowers:  flight, super strength"));
        assert!(text.contains("\"Up, up and away!\""));
        assert!(!text.contains("origin:"));
        assert!(!text.contains("image:"));
    }

    #[rstest]
    #[case(0, "No superheroes match \"cape\".")]
    #[case(1, "1 match for \"cape\":")]
    fn search_headline_follows_result_count(
        superman: Superhero,
        #[case] count: usize,
        #[case] headline: &str,
    ) {
        let results: Vec<Superhero> = std::iter::repeat_n(superman, count).collect();
        let text = SearchView::new("cape", &results).to_string();
        assert!(text.starts_with(headline));
    }

    #[rstest]
    fn form_errors_are_listed_by_field() {
        let mut form = HeroForm::new();
        assert!(form.submit().is_none());
        let text = FormErrorsView(&form).to_string();
        assert!(text.contains("  nickname: Nickname is required"));
        assert!(text.contains("  superpowers: At least one superpower required"));
    }
}
