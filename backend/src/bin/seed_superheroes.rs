//! Replace the stored superheroes with the sample roster.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;

use backend::outbound::persistence::{
    DbPool, DieselSuperheroRepository, PoolConfig, run_pending_migrations,
};
use backend::seed::seed;
use clap::Parser;
use tokio::runtime::Builder;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

const DATABASE_URL_ENV: &str = "HEROES_DATABASE_URL";

/// `seed-superheroes` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed-superheroes",
    about = "Clear the superhero table and insert the sample roster",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `HEROES_DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn resolve_database_url(args: &CliArgs) -> io::Result<String> {
    args.database_url
        .clone()
        .or_else(|| env::var(DATABASE_URL_ENV).ok())
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            io::Error::other(format!(
                "missing database URL: pass --database-url or set {DATABASE_URL_ENV}"
            ))
        })
}

fn main() -> io::Result<()> {
    let _ = fmt().with_env_filter(EnvFilter::from_default_env()).try_init();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let database_url = resolve_database_url(&args)?;

    let applied = run_pending_migrations(&database_url)
        .await
        .map_err(io::Error::other)?;
    info!(applied, "database migrations applied");

    let pool = DbPool::new(PoolConfig::new(database_url.as_str()))
        .await
        .map_err(io::Error::other)?;
    let repository = DieselSuperheroRepository::new(pool);
    let inserted = seed(&repository).await.map_err(io::Error::other)?;
    println!("Seeded {inserted} superheroes");
    Ok(())
}
