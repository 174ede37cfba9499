use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_depth() -> u32 {
    2
}

fn default_max_results() -> usize {
    200
}

/// Crawl roots and bounds, loaded from `config/crawl.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Category names without the `Category:` prefix, crawled in order.
    pub root_categories: Vec<String>,
    #[serde(default = "default_depth")]
    pub depth: u32,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

/// Load and validate the crawl configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_crawl_config(path: &Path) -> Result<CrawlConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CrawlFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_crawl_config(&content)
}

/// Parse and validate crawl configuration from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_crawl_config(content: &str) -> Result<CrawlConfig, ConfigError> {
    let config: CrawlConfig = serde_yaml::from_str(content)?;
    validate_crawl_config(&config)?;
    Ok(config)
}

fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.root_categories.is_empty() {
        return Err(ConfigError::Validation(
            "root_categories must list at least one category".to_string(),
        ));
    }
    if config.max_results == 0 {
        return Err(ConfigError::Validation(
            "max_results must be greater than zero".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for category in &config.root_categories {
        if category.trim().is_empty() {
            return Err(ConfigError::Validation(
                "root category names must be non-empty".to_string(),
            ));
        }
        if category.starts_with("Category:") {
            return Err(ConfigError::Validation(format!(
                "root category '{category}' must not include the 'Category:' prefix"
            )));
        }
        if !seen.insert(category.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate root category: '{category}'"
            )));
        }
    }

    Ok(())
}
