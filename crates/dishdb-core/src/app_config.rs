use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub log_level: String,
    pub crawl_config_path: PathBuf,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub http_max_retries: u32,
    pub http_backoff_base_ms: u64,
    pub inter_request_delay_ms: u64,
    pub batch_pause_ms: u64,
    pub usda_cooldown_secs: u64,
    pub usda_api_key: Option<String>,
    pub recipe_api_key: Option<String>,
    pub wiki_base_url: String,
    pub off_base_url: String,
    pub usda_base_url: String,
    pub recipe_base_url: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("crawl_config_path", &self.crawl_config_path)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("http_max_retries", &self.http_max_retries)
            .field("http_backoff_base_ms", &self.http_backoff_base_ms)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("batch_pause_ms", &self.batch_pause_ms)
            .field("usda_cooldown_secs", &self.usda_cooldown_secs)
            .field(
                "usda_api_key",
                &self.usda_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "recipe_api_key",
                &self.recipe_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("wiki_base_url", &self.wiki_base_url)
            .field("off_base_url", &self.off_base_url)
            .field("usda_base_url", &self.usda_base_url)
            .field("recipe_base_url", &self.recipe_base_url)
            .finish()
    }
}
