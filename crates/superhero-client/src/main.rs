//! `heroes`: browse and edit the superhero catalogue from a terminal.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use pagination::{DEFAULT_LIMIT, PageRequest};
use superhero_client::views::{DetailView, FormErrorsView, ListView, SearchView};
use superhero_client::{ClientError, HeroForm, HeroStore, HttpSuperheroApi};
use superhero_model::SuperheroId;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// `heroes` command arguments.
#[derive(Debug, Parser)]
#[command(name = "heroes", about = "Superhero catalogue client", version)]
struct Cli {
    /// Server base URL.
    #[arg(
        long = "base-url",
        env = "HEROES_API_URL",
        default_value = "http://localhost:5000"
    )]
    base_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show one page of records.
    List(PageArgs),
    /// Show every field of one record.
    Show {
        /// Record id.
        id: String,
    },
    /// Create a record.
    Create(HeroArgs),
    /// Change fields of a record; omitted fields keep their value.
    Edit {
        /// Record id.
        id: String,
        #[command(flatten)]
        fields: HeroArgs,
    },
    /// Delete a record and show the page it was on.
    Delete {
        /// Record id.
        id: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Full-text search.
    Search {
        /// Terms; records matching any of them are shown.
        #[arg(required = true)]
        terms: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, Args)]
struct PageArgs {
    /// 1-based page number.
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Records per page.
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: u32,
}

#[derive(Debug, Clone, Default, Args)]
struct HeroArgs {
    /// Public alias.
    #[arg(long)]
    nickname: Option<String>,
    /// Civilian name.
    #[arg(long = "real-name")]
    real_name: Option<String>,
    /// Origin story.
    #[arg(long)]
    origin: Option<String>,
    /// Comma-separated powers.
    #[arg(long)]
    powers: Option<String>,
    /// Signature line.
    #[arg(long = "catch-phrase")]
    catch_phrase: Option<String>,
    /// Image URL; repeat to add several.
    #[arg(long = "image")]
    images: Vec<String>,
    /// Drop existing images before adding new ones.
    #[arg(long = "clear-images")]
    clear_images: bool,
}

impl HeroArgs {
    /// Overlay the given fields onto `form`, collecting image URL errors.
    fn apply(self, form: &mut HeroForm) {
        let Self {
            nickname,
            real_name,
            origin,
            powers,
            catch_phrase,
            images,
            clear_images,
        } = self;
        if let Some(value) = nickname {
            form.nickname = value;
        }
        if let Some(value) = real_name {
            form.real_name = value;
        }
        if let Some(value) = origin {
            form.origin_description = value;
        }
        if let Some(value) = powers {
            form.superpowers = value;
        }
        if let Some(value) = catch_phrase {
            form.catch_phrase = value;
        }
        if clear_images {
            form.images.clear();
        }
        for url in images {
            form.new_image_url = url;
            form.add_image();
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("{0} is not a valid superhero id")]
    BadId(String),
    #[error("the form has errors:\n{0}")]
    Form(String),
    #[error("could not write output: {0}")]
    Output(#[from] io::Error),
}

impl From<pagination::PaginationError> for CliError {
    fn from(err: pagination::PaginationError) -> Self {
        Self::Client(err.into())
    }
}

fn parse_id(raw: &str) -> Result<SuperheroId, CliError> {
    raw.parse().map_err(|_| CliError::BadId(raw.to_owned()))
}

fn form_error(form: &HeroForm) -> CliError {
    CliError::Form(FormErrorsView(form).to_string())
}

fn print_page(out: &mut impl Write, store: &HeroStore<HttpSuperheroApi>) -> io::Result<()> {
    write!(out, "{}", ListView::new(store.heroes(), store.page_info()))
}

async fn save(
    store: &mut HeroStore<HttpSuperheroApi>,
    id: Option<SuperheroId>,
    mut form: HeroForm,
) -> Result<superhero_model::Superhero, CliError> {
    if form.has_errors() {
        return Err(form_error(&form));
    }
    let Some(draft) = form.submit() else {
        return Err(form_error(&form));
    };
    let result = match id {
        Some(id) => store.update_hero(&id, &draft).await,
        None => store.add_hero(&draft).await,
    };
    result.map_err(|err| {
        form.apply_failure(&err);
        form_error(&form)
    })
}

async fn run(cli: Cli, out: &mut impl Write) -> Result<(), CliError> {
    let api = HttpSuperheroApi::new(cli.base_url);
    debug!(base_url = api.base_url(), "using catalogue server");
    match cli.command {
        Command::List(args) => {
            let mut store = HeroStore::with_request(api, PageRequest::new(args.page, args.limit)?);
            store.refresh().await?;
            print_page(out, &store)?;
        }
        Command::Show { id } => {
            let mut store = HeroStore::new(api);
            let hero = store.fetch_hero(&parse_id(&id)?).await?;
            write!(out, "{}", DetailView(&hero))?;
        }
        Command::Create(fields) => {
            let mut store = HeroStore::new(api);
            store.refresh().await?;
            let mut form = HeroForm::new();
            fields.apply(&mut form);
            let hero = save(&mut store, None, form).await?;
            writeln!(out, "Superhero created successfully")?;
            write!(out, "{}", DetailView(&hero))?;
            print_page(out, &store)?;
        }
        Command::Edit { id, fields } => {
            let hero_id = parse_id(&id)?;
            let mut store = HeroStore::new(api);
            let current = store.fetch_hero(&hero_id).await?;
            let mut form = HeroForm::from_hero(&current);
            fields.apply(&mut form);
            let hero = save(&mut store, Some(hero_id), form).await?;
            writeln!(out, "Superhero updated successfully")?;
            write!(out, "{}", DetailView(&hero))?;
        }
        Command::Delete { id, page } => {
            let hero_id = parse_id(&id)?;
            let mut store = HeroStore::with_request(api, PageRequest::new(page.page, page.limit)?);
            store.delete_hero(&hero_id).await?;
            writeln!(out, "Superhero deleted successfully")?;
            print_page(out, &store)?;
        }
        Command::Search { terms } => {
            let query = terms.join(" ");
            let mut store = HeroStore::new(api);
            let results = store.search(&query).await?;
            write!(out, "{}", SearchView::new(&query, &results))?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        tracing::warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();
    match run(cli, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let mut stderr = io::stderr().lock();
            if writeln!(stderr, "error: {err}").is_err() {
                return ExitCode::from(2);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn edit_keeps_unspecified_fields() {
        let mut form = HeroForm::new();
        form.nickname = "Batman".to_owned();
        form.real_name = "Bruce Wayne".to_owned();
        form.superpowers = "stealth".to_owned();
        form.images = vec!["https://example.com/old.png".to_owned()];
        HeroArgs {
            catch_phrase: Some("I am the night".to_owned()),
            images: vec!["https://example.com/new.png".to_owned()],
            ..HeroArgs::default()
        }
        .apply(&mut form);

        assert_eq!(form.nickname, "Batman");
        assert_eq!(form.catch_phrase, "I am the night");
        assert_eq!(form.images.len(), 2);
    }

    #[rstest]
    fn bad_image_urls_are_reported_before_submit() {
        let mut form = HeroForm::new();
        HeroArgs {
            images: vec!["nope".to_owned()],
            ..HeroArgs::default()
        }
        .apply(&mut form);
        assert!(form.has_errors());
    }

    #[rstest]
    fn search_requires_terms() {
        assert!(Cli::try_parse_from(["heroes", "search"]).is_err());
    }

    #[rstest]
    fn base_url_flag_overrides_the_default() {
        let cli = Cli::try_parse_from(["heroes", "--base-url", "http://api.test", "list"])
            .expect("parses");
        assert_eq!(cli.base_url, "http://api.test");
    }
}
