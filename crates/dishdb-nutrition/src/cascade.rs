//! The nutrition fallback chain for one catalog entry.
//!
//! Sources are tried in order until one yields a positive calorie count:
//!
//! 1. curated reference table (by normalized name)
//! 2. Open Food Facts
//! 3. USDA, skipped while its breaker is open
//! 4. manual category profile (always answers, unless disabled)
//!
//! Provider failures are logged and fall through to the next source. A USDA
//! rate-limit trips the breaker instead.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dishdb_core::names::strip_parenthetical;
use dishdb_core::{CatalogEntry, EntryPatch, ErrorKind, NutritionInfo, NutritionSource};

use crate::breaker::CircuitBreaker;
use crate::merge::merge_nutrition;
use crate::profiles::manual_profile;
use crate::provider::NutritionProvider;
use crate::reference::lookup_reference;

/// Nutrition found for an entry, already merged over its existing values.
#[derive(Debug, Clone, PartialEq)]
pub struct NutritionMatch {
    pub nutrition: NutritionInfo,
    pub source: NutritionSource,
    pub enriched_at: DateTime<Utc>,
}

impl NutritionMatch {
    /// The field-level update that persists this match.
    #[must_use]
    pub fn patch(&self) -> EntryPatch {
        EntryPatch {
            nutrition_info: Some(self.nutrition.clone()),
            nutrition_source: Some(self.source),
            nutrition_enriched_at: Some(self.enriched_at),
            ..EntryPatch::default()
        }
    }
}

pub struct NutritionCascade<O, U> {
    off: Option<O>,
    usda: Option<U>,
    usda_breaker: Arc<CircuitBreaker>,
    manual_profiles: bool,
}

impl<O, U> NutritionCascade<O, U>
where
    O: NutritionProvider + Sync,
    U: NutritionProvider + Sync,
{
    /// `None` for a provider removes it from the chain (e.g. USDA without an
    /// API key).
    #[must_use]
    pub fn new(off: Option<O>, usda: Option<U>, usda_breaker: Arc<CircuitBreaker>) -> Self {
        Self {
            off,
            usda,
            usda_breaker,
            manual_profiles: true,
        }
    }

    /// Ends the chain after the providers instead of falling back to a
    /// heuristic profile.
    #[must_use]
    pub fn without_manual_profiles(mut self) -> Self {
        self.manual_profiles = false;
        self
    }

    #[must_use]
    pub fn usda_breaker(&self) -> &CircuitBreaker {
        &self.usda_breaker
    }

    pub async fn enrich_nutrition(&self, entry: &CatalogEntry) -> Option<NutritionMatch> {
        self.enrich_nutrition_at(entry, Utc::now()).await
    }

    /// Runs the chain as of `now` (breaker checks and the recorded
    /// timestamp). `None` only when manual profiles are disabled and no
    /// source answered.
    pub async fn enrich_nutrition_at(
        &self,
        entry: &CatalogEntry,
        now: DateTime<Utc>,
    ) -> Option<NutritionMatch> {
        let (source, found) = self.find(entry, now).await?;
        tracing::debug!(entry = %entry.name, %source, "nutrition source matched");
        Some(NutritionMatch {
            nutrition: merge_nutrition(entry.nutrition_info.as_ref(), &found),
            source,
            enriched_at: now,
        })
    }

    async fn find(
        &self,
        entry: &CatalogEntry,
        now: DateTime<Utc>,
    ) -> Option<(NutritionSource, NutritionInfo)> {
        if let Some(info) = lookup_reference(&entry.name) {
            return Some((NutritionSource::Reference, info));
        }

        let query = strip_parenthetical(&entry.name);

        if let Some(off) = &self.off {
            if let Some(found) = try_provider(off, &query, None).await {
                return Some(found);
            }
        }

        if let Some(usda) = &self.usda {
            if self.usda_breaker.is_open_at(now) {
                tracing::debug!(
                    entry = %entry.name,
                    provider = self.usda_breaker.name(),
                    "breaker open, skipping provider"
                );
            } else if let Some(found) = try_provider(usda, &query, Some((&self.usda_breaker, now))).await {
                return Some(found);
            }
        }

        if self.manual_profiles {
            return Some((NutritionSource::ManualProfile, manual_profile(entry)));
        }
        None
    }
}

/// One provider attempt. Only calorie-bearing results count as a hit.
async fn try_provider<P: NutritionProvider + Sync>(
    provider: &P,
    query: &str,
    breaker: Option<(&CircuitBreaker, DateTime<Utc>)>,
) -> Option<(NutritionSource, NutritionInfo)> {
    let source = provider.source();
    match provider.lookup(query).await {
        Ok(Some(info)) if info.has_calories() => Some((source, info)),
        Ok(_) => {
            tracing::debug!(query, %source, "no calorie-bearing match");
            None
        }
        Err(e) if e.kind() == ErrorKind::RateLimited => {
            match breaker {
                Some((b, now)) => b.trip_at(now),
                None => tracing::warn!(query, %source, error = %e, "provider rate limited"),
            }
            None
        }
        Err(e) => {
            tracing::warn!(query, %source, error = %e, "nutrition provider failed, falling through");
            None
        }
    }
}

#[cfg(test)]
#[path = "cascade_test.rs"]
mod tests;
