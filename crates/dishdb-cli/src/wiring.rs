//! Builds clients and the pipeline from [`AppConfig`].

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use dishdb_core::{load_crawl_config, AppConfig, CrawlConfig};
use dishdb_db::PgCatalog;
use dishdb_fetch::{HttpFetcher, RetryPolicy};
use dishdb_nutrition::{
    CircuitBreaker, NutritionCascade, OpenFoodFactsClient, RecipeClient, UsdaClient,
};
use dishdb_pipeline::{Pacing, Pipeline, PipelineConfig};
use dishdb_wiki::WikiClient;

pub(crate) type CliPipeline = Pipeline<PgCatalog, WikiClient, OpenFoodFactsClient, UsdaClient>;

pub(crate) fn load_crawl(config: &AppConfig) -> anyhow::Result<CrawlConfig> {
    load_crawl_config(&config.crawl_config_path).with_context(|| {
        format!(
            "failed to load crawl config from {}",
            config.crawl_config_path.display()
        )
    })
}

fn http_fetcher(config: &AppConfig) -> anyhow::Result<HttpFetcher> {
    let policy = RetryPolicy::new(
        config.http_max_retries,
        Duration::from_millis(config.http_backoff_base_ms),
    );
    HttpFetcher::new(config.http_timeout_secs, &config.user_agent, policy)
        .context("failed to build HTTP client")
}

pub(crate) fn recipe_client(config: &AppConfig) -> anyhow::Result<RecipeClient> {
    Ok(RecipeClient::new(
        http_fetcher(config)?,
        &config.recipe_base_url,
        config.recipe_api_key.clone(),
    )?)
}

pub(crate) fn build_pipeline(
    pool: sqlx::PgPool,
    config: &AppConfig,
    crawl: &CrawlConfig,
) -> anyhow::Result<CliPipeline> {
    let fetcher = http_fetcher(config)?;
    let wiki = WikiClient::new(fetcher.clone(), &config.wiki_base_url)?;
    let off = OpenFoodFactsClient::new(fetcher.clone(), &config.off_base_url)?;
    let usda = config
        .usda_api_key
        .as_deref()
        .map(|key| UsdaClient::new(fetcher, &config.usda_base_url, key))
        .transpose()?;
    if usda.is_none() {
        tracing::info!("USDA_API_KEY is not set; USDA lookups disabled");
    }

    let breaker = Arc::new(CircuitBreaker::new(
        "usda",
        Duration::from_secs(config.usda_cooldown_secs),
    ));
    let nutrition = NutritionCascade::new(Some(off), usda, breaker);
    let pipeline_config = PipelineConfig::new(crawl, Pacing::from_config(config));

    Ok(Pipeline::new(
        PgCatalog::new(pool),
        wiki,
        nutrition,
        pipeline_config,
    ))
}
