//! Offline unit tests for dishdb-db pool configuration and row types.
//! These tests do not require a live database connection.

use std::path::PathBuf;

use dishdb_core::{AppConfig, CatalogEntry, Environment};
use dishdb_db::{CatalogRow, PoolConfig};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        log_level: "info".to_string(),
        crawl_config_path: PathBuf::from("./config/crawl.yaml"),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        http_timeout_secs: 30,
        user_agent: "ua".to_string(),
        http_max_retries: 3,
        http_backoff_base_ms: 1000,
        inter_request_delay_ms: 250,
        batch_pause_ms: 5000,
        usda_cooldown_secs: 3600,
        usda_api_key: None,
        recipe_api_key: None,
        wiki_base_url: "https://en.wikipedia.org".to_string(),
        off_base_url: "https://world.openfoodfacts.org".to_string(),
        usda_base_url: "https://api.nal.usda.gov/fdc/v1".to_string(),
        recipe_base_url: "https://api.spoonacular.com".to_string(),
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`CatalogRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn catalog_row_without_nutrition_converts() {
    use chrono::Utc;
    use uuid::Uuid;

    let row = CatalogRow {
        id: Uuid::new_v4(),
        name: "Kontomire stew".to_string(),
        description: Some("A Ghanaian stew of cocoyam leaves.".to_string()),
        image_url: None,
        wiki_url: Some("https://en.wikipedia.org/wiki/Kontomire".to_string()),
        nutrition_info: None,
        nutrition_source: None,
        nutrition_enriched_at: None,
        wiki_enriched_at: None,
        categories: vec![],
        tags: vec!["stew".to_string()],
        country_id: None,
        country_name: None,
        region: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let entry = CatalogEntry::try_from(row).expect("row should convert");
    assert_eq!(entry.name, "Kontomire stew");
    assert!(entry.needs_nutrition());
    assert!(entry.tags.contains("stew"));
}
