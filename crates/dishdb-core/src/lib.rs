//! Shared domain types, configuration and the catalog store seam for dishdb.

pub mod app_config;
pub mod candidate;
pub mod catalog;
pub mod config;
pub mod crawl_config;
pub mod entry;
pub mod error;
pub mod names;
pub mod nutrition;

pub use app_config::{AppConfig, Environment};
pub use candidate::CandidateArticle;
pub use catalog::{CatalogStore, MemoryCatalog};
pub use config::{load_app_config, load_app_config_from_env};
pub use crawl_config::{load_crawl_config, CrawlConfig};
pub use entry::{CatalogEntry, EntryId, EntryPatch, NewCatalogEntry};
pub use error::{CatalogError, ConfigError, ErrorKind};
pub use nutrition::{NutritionInfo, NutritionSource};
