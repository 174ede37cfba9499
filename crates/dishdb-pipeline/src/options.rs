//! Run options and pacing. Each option struct defaults independently.

use std::time::Duration;

use dishdb_core::AppConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscoveryOptions {
    pub depth: u32,
    pub max_results: usize,
    pub min_confidence: u8,
    /// Fetch a summary and score each candidate. When off, candidates are
    /// returned unscored and unfiltered by confidence.
    pub enrich: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            depth: 2,
            max_results: 200,
            min_confidence: 60,
            enrich: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportOptions {
    pub min_confidence: u8,
    pub limit: usize,
    pub depth: u32,
    pub dry_run: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            min_confidence: 70,
            limit: 50,
            depth: 2,
            dry_run: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnrichOptions {
    pub dry_run: bool,
    /// Entries processed between long pauses.
    pub batch_size: usize,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            dry_run: true,
            batch_size: 10,
        }
    }
}

/// Delays applied between provider calls and between batches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pacing {
    pub inter_request: Duration,
    pub batch_pause: Duration,
}

impl Pacing {
    /// No delays at all.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            inter_request: Duration::from_millis(config.inter_request_delay_ms),
            batch_pause: Duration::from_millis(config.batch_pause_ms),
        }
    }

    pub async fn after_call(&self) {
        if !self.inter_request.is_zero() {
            tokio::time::sleep(self.inter_request).await;
        }
    }

    /// Sleeps for the batch pause before every `batch_size`-th entry
    /// (never before the first).
    pub async fn before_entry(&self, index: usize, batch_size: usize) {
        if index > 0 && batch_size > 0 && index % batch_size == 0 && !self.batch_pause.is_zero() {
            tracing::info!(
                processed = index,
                pause_ms = u64::try_from(self.batch_pause.as_millis()).unwrap_or(u64::MAX),
                "batch complete, pausing"
            );
            tokio::time::sleep(self.batch_pause).await;
        }
    }
}
