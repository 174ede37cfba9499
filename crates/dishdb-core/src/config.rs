use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_WIKI_BASE_URL: &str = "https://en.wikipedia.org";
const DEFAULT_OFF_BASE_URL: &str = "https://world.openfoodfacts.org";
const DEFAULT_USDA_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
const DEFAULT_RECIPE_BASE_URL: &str = "https://api.spoonacular.com";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = require("DATABASE_URL")?;

    let env = parse_environment(&or_default("DISHDB_ENV", "development"))?;
    let log_level = or_default("DISHDB_LOG_LEVEL", "info");
    let crawl_config_path =
        PathBuf::from(or_default("DISHDB_CRAWL_CONFIG_PATH", "./config/crawl.yaml"));

    let db_max_connections = parse_u32("DISHDB_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("DISHDB_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("DISHDB_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let http_timeout_secs = parse_u64("DISHDB_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("DISHDB_USER_AGENT", "dishdb/0.1 (african-dish-catalog)");
    let http_max_retries = parse_u32("DISHDB_HTTP_MAX_RETRIES", "3")?;
    let http_backoff_base_ms = parse_u64("DISHDB_HTTP_BACKOFF_BASE_MS", "1000")?;
    let inter_request_delay_ms = parse_u64("DISHDB_INTER_REQUEST_DELAY_MS", "250")?;
    let batch_pause_ms = parse_u64("DISHDB_BATCH_PAUSE_MS", "5000")?;
    let usda_cooldown_secs = parse_u64("DISHDB_USDA_COOLDOWN_SECS", "3600")?;

    let usda_api_key = optional("USDA_API_KEY");
    let recipe_api_key = optional("SPOONACULAR_API_KEY");

    let wiki_base_url = or_default("DISHDB_WIKI_BASE_URL", DEFAULT_WIKI_BASE_URL);
    let off_base_url = or_default("DISHDB_OFF_BASE_URL", DEFAULT_OFF_BASE_URL);
    let usda_base_url = or_default("DISHDB_USDA_BASE_URL", DEFAULT_USDA_BASE_URL);
    let recipe_base_url = or_default("DISHDB_RECIPE_BASE_URL", DEFAULT_RECIPE_BASE_URL);

    if db_min_connections > db_max_connections {
        return Err(ConfigError::InvalidEnvVar {
            var: "DISHDB_DB_MIN_CONNECTIONS".to_string(),
            reason: format!(
                "min connections ({db_min_connections}) exceeds max connections ({db_max_connections})"
            ),
        });
    }

    Ok(AppConfig {
        database_url,
        env,
        log_level,
        crawl_config_path,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        http_timeout_secs,
        user_agent,
        http_max_retries,
        http_backoff_base_ms,
        inter_request_delay_ms,
        batch_pause_ms,
        usda_cooldown_secs,
        usda_api_key,
        recipe_api_key,
        wiki_base_url,
        off_base_url,
        usda_base_url,
        recipe_base_url,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "DISHDB_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
