mod enrich;
mod wiring;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dishdb_core::{AppConfig, CatalogStore};
use dishdb_pipeline::{DiscoveryOptions, ImportOptions};
use tracing_subscriber::EnvFilter;

use crate::enrich::EnrichCommands;

#[derive(Debug, Parser)]
#[command(name = "dishdb-cli")]
#[command(about = "African dish catalog discovery and enrichment")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List encyclopedia dishes missing from the catalog
    Discover {
        /// Subcategory levels to descend below each root (crawl config default)
        #[arg(long)]
        depth: Option<u32>,
        /// Stop crawling after this many articles (crawl config default)
        #[arg(long)]
        max_results: Option<usize>,
        /// Drop scored candidates below this confidence
        #[arg(long, default_value_t = 60)]
        min_confidence: u8,
        /// Skip summary lookups and scoring
        #[arg(long)]
        no_enrich: bool,
    },
    /// Import the best-scoring missing dishes into the catalog
    Import {
        #[arg(long, default_value_t = 70)]
        min_confidence: u8,
        /// Import at most this many candidates
        #[arg(long, default_value_t = 50)]
        limit: usize,
        #[arg(long)]
        depth: Option<u32>,
        /// Write to the catalog (without this the run is a dry run)
        #[arg(long)]
        apply: bool,
    },
    /// Fill missing nutrition or encyclopedia fields on catalog entries
    Enrich {
        #[command(subcommand)]
        command: EnrichCommands,
    },
    /// Search recipes for a dish
    Recipes {
        query: String,
        #[arg(long, default_value_t = 10)]
        number: u32,
    },
    /// Database management
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Verify the database connection
    Ping,
    /// Apply pending migrations
    Migrate,
    /// Print the number of catalog entries
    Count,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("dishdb-cli ready; run with --help to list commands");
        return Ok(());
    };

    let config = dishdb_core::load_app_config().context("failed to load configuration")?;
    init_tracing(&config.log_level)?;

    match command {
        Commands::Recipes { query, number } => {
            let client = wiring::recipe_client(&config)?;
            let result = client.search(&query, number).await?;
            print_json(&result)
        }
        Commands::Db { command } => run_db(&connect(&config).await?, command).await,
        Commands::Discover {
            depth,
            max_results,
            min_confidence,
            no_enrich,
        } => {
            let crawl = wiring::load_crawl(&config)?;
            let opts = DiscoveryOptions {
                depth: depth.unwrap_or(crawl.depth),
                max_results: max_results.unwrap_or(crawl.max_results),
                min_confidence,
                enrich: !no_enrich,
            };
            let pipeline = wiring::build_pipeline(connect(&config).await?, &config, &crawl)?;
            let found = pipeline.discover_missing(&opts).await?;
            print_json(&found)
        }
        Commands::Import {
            min_confidence,
            limit,
            depth,
            apply,
        } => {
            let crawl = wiring::load_crawl(&config)?;
            let opts = ImportOptions {
                min_confidence,
                limit,
                depth: depth.unwrap_or(crawl.depth),
                dry_run: !apply,
            };
            let pipeline = wiring::build_pipeline(connect(&config).await?, &config, &crawl)?;
            let summary = pipeline.bulk_import_discoveries(&opts).await?;
            print_json(&summary)
        }
        Commands::Enrich { command } => {
            let crawl = wiring::load_crawl(&config)?;
            let pipeline = wiring::build_pipeline(connect(&config).await?, &config, &crawl)?;
            enrich::run_enrich(&pipeline, command).await
        }
    }
}

async fn connect(config: &AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool_config = dishdb_db::PoolConfig::from_app_config(config);
    dishdb_db::connect_pool(&config.database_url, pool_config)
        .await
        .context("failed to connect to database")
}

async fn run_db(pool: &sqlx::PgPool, command: DbCommands) -> anyhow::Result<()> {
    match command {
        DbCommands::Ping => {
            dishdb_db::health_check(pool).await?;
            println!("database reachable");
        }
        DbCommands::Migrate => {
            let applied = dishdb_db::run_migrations(pool).await?;
            println!("applied {applied} migration(s)");
        }
        DbCommands::Count => {
            let catalog = dishdb_db::PgCatalog::new(pool.clone());
            let count = catalog.count_entries().await?;
            println!("{count}");
        }
    }
    Ok(())
}

/// Logs go to stderr so stdout carries only the JSON result.
fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests;
