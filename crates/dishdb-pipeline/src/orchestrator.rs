//! Batch runs over the catalog.
//!
//! Every run is sequential: one provider or catalog call at a time, each
//! followed by the configured pacing delay. Per-item failures are recorded
//! in the run's summary and never abort it; only reading the catalog up
//! front can fail a run. Dry runs make the same provider calls and decisions
//! but write nothing.

use chrono::Utc;
use dishdb_core::{
    CandidateArticle, CatalogEntry, CatalogStore, CrawlConfig, EntryId, NewCatalogEntry,
};
use dishdb_nutrition::{NutritionCascade, NutritionProvider};
use dishdb_wiki::Encyclopedia;

use crate::crawler::crawl;
use crate::describe::{changed_fields, enrich_from_encyclopedia};
use crate::error::PipelineError;
use crate::gap::find_missing;
use crate::options::{DiscoveryOptions, EnrichOptions, ImportOptions, Pacing};
use crate::region::infer_region;
use crate::scorer::{score_candidate, ScoringWeights};
use crate::summary::{EnrichItem, EnrichSummary, ImportItem, ImportSummary, ItemFailure};

/// Entries with a shorter description are picked for encyclopedia enrichment.
pub const MIN_DESCRIPTION_LEN: usize = 50;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Category names crawled in order, without the `Category:` prefix.
    pub root_categories: Vec<String>,
    /// Crawl cap used by imports, which take no `max_results` of their own.
    pub import_max_results: usize,
    pub weights: ScoringWeights,
    pub pacing: Pacing,
    pub min_description_len: usize,
}

impl PipelineConfig {
    #[must_use]
    pub fn new(crawl: &CrawlConfig, pacing: Pacing) -> Self {
        Self {
            root_categories: crawl.root_categories.clone(),
            import_max_results: crawl.max_results,
            weights: ScoringWeights::default(),
            pacing,
            min_description_len: MIN_DESCRIPTION_LEN,
        }
    }
}

/// The discovery and enrichment pipeline over one catalog.
pub struct Pipeline<C, E, O, U> {
    catalog: C,
    wiki: E,
    nutrition: NutritionCascade<O, U>,
    config: PipelineConfig,
}

impl<C, E, O, U> Pipeline<C, E, O, U>
where
    C: CatalogStore + Sync,
    E: Encyclopedia + Sync,
    O: NutritionProvider + Sync,
    U: NutritionProvider + Sync,
{
    #[must_use]
    pub fn new(
        catalog: C,
        wiki: E,
        nutrition: NutritionCascade<O, U>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            catalog,
            wiki,
            nutrition,
            config,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Crawls the configured roots, drops candidates already in the catalog,
    /// then (with `enrich`) scores each survivor from its page summary.
    /// Scored results are filtered by `min_confidence` and sorted by
    /// confidence, highest first.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Catalog`] if the existing names cannot be read.
    pub async fn discover_missing(
        &self,
        opts: &DiscoveryOptions,
    ) -> Result<Vec<CandidateArticle>, PipelineError> {
        let existing: Vec<String> = self
            .catalog
            .list_entries()
            .await?
            .into_iter()
            .map(|e| e.name)
            .collect();

        let crawled = crawl(
            &self.wiki,
            &self.config.root_categories,
            opts.depth,
            opts.max_results,
            &self.config.pacing,
        )
        .await;
        let crawled_count = crawled.len();
        let missing = find_missing(crawled, &existing);
        tracing::info!(
            crawled = crawled_count,
            missing = missing.len(),
            existing = existing.len(),
            "gap detection complete"
        );

        if !opts.enrich {
            return Ok(missing);
        }

        let mut scored = Vec::with_capacity(missing.len());
        for mut candidate in missing {
            self.score(&mut candidate).await;
            if candidate.meets_confidence(opts.min_confidence) {
                scored.push(candidate);
            }
        }
        scored.sort_by(|a, b| b.confidence.cmp(&a.confidence));

        tracing::info!(
            eligible = scored.len(),
            min_confidence = opts.min_confidence,
            "discovery complete"
        );
        Ok(scored)
    }

    /// Fills description, image and page categories from the summary, then
    /// scores. A failed lookup gets the fixed lookup-failure score.
    async fn score(&self, candidate: &mut CandidateArticle) {
        let weights = &self.config.weights;
        match self.wiki.page_summary(&candidate.display_title()).await {
            Ok(Some(summary)) => {
                candidate.description = summary.extract;
                candidate.image_url = summary.thumbnail;
                if let Some(url) = summary.url {
                    candidate.wiki_url = url;
                }
                candidate.category_tags.extend(summary.categories);
                candidate.confidence = Some(score_candidate(candidate, weights));
            }
            Ok(None) => {
                candidate.confidence = Some(weights.no_description);
            }
            Err(e) => {
                tracing::warn!(title = %candidate.title, error = %e, "summary lookup failed");
                candidate.confidence = Some(weights.lookup_failed);
            }
        }
        self.config.pacing.after_call().await;
    }

    /// Imports up to `limit` of the best discovered candidates, inferring
    /// country and region from their tags. In a dry run the would-be entries
    /// are validated and reported but not created.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Catalog`] if discovery cannot read the catalog.
    pub async fn bulk_import_discoveries(
        &self,
        opts: &ImportOptions,
    ) -> Result<ImportSummary, PipelineError> {
        let discovery = DiscoveryOptions {
            depth: opts.depth,
            max_results: self.config.import_max_results,
            min_confidence: opts.min_confidence,
            enrich: true,
        };
        let mut candidates = self.discover_missing(&discovery).await?;

        let mut summary = ImportSummary::new(candidates.len(), opts.dry_run);
        summary.skipped = candidates.len().saturating_sub(opts.limit);
        candidates.truncate(opts.limit);

        for candidate in candidates {
            let new = new_entry_from(&candidate);
            let mut item = ImportItem {
                name: new.name.clone(),
                wiki_url: candidate.wiki_url.clone(),
                confidence: candidate.confidence,
                country_name: new.country_name.clone(),
                region: new.region.clone(),
                id: None,
            };

            if let Err(e) = new.validate() {
                summary.record_failure(ItemFailure {
                    item: item.name,
                    id: None,
                    kind: e.kind(),
                    message: e.to_string(),
                });
                continue;
            }

            if opts.dry_run {
                summary.record_import(item);
                continue;
            }

            match self.catalog.create_entry(&new).await {
                Ok(created) => {
                    tracing::info!(name = %created.name, id = %created.id, "imported entry");
                    item.id = Some(created.id);
                    summary.record_import(item);
                }
                Err(e) => {
                    tracing::warn!(name = %item.name, error = %e, "import failed");
                    summary.record_failure(ItemFailure {
                        item: item.name,
                        id: None,
                        kind: e.kind(),
                        message: e.to_string(),
                    });
                }
            }
            self.config.pacing.after_call().await;
        }

        tracing::info!(
            total = summary.total,
            imported = summary.imported,
            skipped = summary.skipped,
            failed = summary.failed,
            dry_run = summary.dry_run,
            "bulk import complete"
        );
        Ok(summary)
    }

    /// Runs the nutrition cascade over every entry lacking calories.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Catalog`] if the catalog cannot be listed.
    pub async fn bulk_enrich_nutrition(
        &self,
        opts: &EnrichOptions,
    ) -> Result<EnrichSummary, PipelineError> {
        let entries = self.catalog.list_entries().await?;
        let mut summary = EnrichSummary::new(entries.len(), opts.dry_run);
        let targets: Vec<CatalogEntry> =
            entries.into_iter().filter(CatalogEntry::needs_nutrition).collect();
        summary.skipped = summary.total - targets.len();

        for (index, entry) in targets.iter().enumerate() {
            self.config
                .pacing
                .before_entry(index, opts.batch_size)
                .await;
            self.enrich_one_nutrition(entry, opts.dry_run, &mut summary)
                .await;
            self.config.pacing.after_call().await;
        }

        tracing::info!(
            total = summary.total,
            enriched = summary.enriched,
            skipped = summary.skipped,
            failed = summary.failed,
            dry_run = summary.dry_run,
            "bulk nutrition enrichment complete"
        );
        Ok(summary)
    }

    async fn enrich_one_nutrition(
        &self,
        entry: &CatalogEntry,
        dry_run: bool,
        summary: &mut EnrichSummary,
    ) {
        let Some(found) = self.nutrition.enrich_nutrition(entry).await else {
            tracing::debug!(entry = %entry.name, "no nutrition source matched");
            summary.skipped += 1;
            return;
        };
        let item = EnrichItem {
            id: entry.id,
            name: entry.name.clone(),
            source: Some(found.source),
            fields: vec!["nutritionInfo"],
            applied: !dry_run,
        };
        if dry_run {
            summary.record_enriched(item);
            return;
        }
        match self.catalog.update_entry(entry.id, &found.patch()).await {
            Ok(_) => summary.record_enriched(item),
            Err(e) => {
                tracing::warn!(entry = %entry.name, error = %e, "nutrition update failed");
                summary.record_failure(failure_for(entry, e.kind(), e.to_string()));
            }
        }
    }

    /// Fills missing descriptions and images from the encyclopedia for every
    /// entry with a short or missing description or no image.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Catalog`] if the catalog cannot be listed.
    pub async fn bulk_enrich_from_wikipedia(
        &self,
        opts: &EnrichOptions,
    ) -> Result<EnrichSummary, PipelineError> {
        let entries = self.catalog.list_entries().await?;
        let mut summary = EnrichSummary::new(entries.len(), opts.dry_run);
        let min_len = self.config.min_description_len;
        let targets: Vec<CatalogEntry> = entries
            .into_iter()
            .filter(|e| e.needs_encyclopedia(min_len))
            .collect();
        summary.skipped = summary.total - targets.len();

        for (index, entry) in targets.iter().enumerate() {
            self.config
                .pacing
                .before_entry(index, opts.batch_size)
                .await;
            match self.enrich_one_encyclopedia(entry, opts.dry_run).await {
                Ok(Some(item)) => summary.record_enriched(item),
                Ok(None) => summary.skipped += 1,
                Err(failure) => summary.record_failure(failure),
            }
            self.config.pacing.after_call().await;
        }

        tracing::info!(
            total = summary.total,
            enriched = summary.enriched,
            skipped = summary.skipped,
            failed = summary.failed,
            dry_run = summary.dry_run,
            "bulk encyclopedia enrichment complete"
        );
        Ok(summary)
    }

    /// `Ok(None)` when there is no page or nothing to fill.
    async fn enrich_one_encyclopedia(
        &self,
        entry: &CatalogEntry,
        dry_run: bool,
    ) -> Result<Option<EnrichItem>, ItemFailure> {
        let patch = match enrich_from_encyclopedia(&self.wiki, entry, Utc::now()).await {
            Ok(Some(patch)) => patch,
            Ok(None) => return Ok(None),
            Err(e) => {
                tracing::warn!(entry = %entry.name, error = %e, "encyclopedia lookup failed");
                return Err(failure_for(entry, e.kind(), e.to_string()));
            }
        };
        if patch.is_empty() {
            return Ok(None);
        }
        let fields = changed_fields(&patch);
        if !dry_run {
            if let Err(e) = self.catalog.update_entry(entry.id, &patch).await {
                tracing::warn!(entry = %entry.name, error = %e, "encyclopedia update failed");
                return Err(failure_for(entry, e.kind(), e.to_string()));
            }
        }
        Ok(Some(EnrichItem {
            id: entry.id,
            name: entry.name.clone(),
            source: None,
            fields,
            applied: !dry_run,
        }))
    }

    /// Runs the nutrition cascade for one entry.
    ///
    /// Returns `None` only when no source answered.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Catalog`] with a not-found error for an
    /// unknown id, or when the update fails.
    pub async fn enrich_entry_nutrition(
        &self,
        id: EntryId,
        dry_run: bool,
    ) -> Result<Option<EnrichItem>, PipelineError> {
        let entry = self.catalog.get_entry(id).await?;
        let Some(found) = self.nutrition.enrich_nutrition(&entry).await else {
            return Ok(None);
        };
        if !dry_run {
            self.catalog.update_entry(id, &found.patch()).await?;
        }
        Ok(Some(EnrichItem {
            id,
            name: entry.name,
            source: Some(found.source),
            fields: vec!["nutritionInfo"],
            applied: !dry_run,
        }))
    }

    /// Fills one entry's description and image from the encyclopedia.
    ///
    /// Returns `None` when the encyclopedia has no page for it or there is
    /// nothing to fill.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Catalog`] for an unknown id or a failed
    /// update, and [`PipelineError::Wiki`] when the lookup fails.
    pub async fn enrich_entry_from_encyclopedia(
        &self,
        id: EntryId,
        dry_run: bool,
    ) -> Result<Option<EnrichItem>, PipelineError> {
        let entry = self.catalog.get_entry(id).await?;
        let Some(patch) = enrich_from_encyclopedia(&self.wiki, &entry, Utc::now()).await? else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(None);
        }
        let fields = changed_fields(&patch);
        if !dry_run {
            self.catalog.update_entry(id, &patch).await?;
        }
        Ok(Some(EnrichItem {
            id,
            name: entry.name,
            source: None,
            fields,
            applied: !dry_run,
        }))
    }
}

fn failure_for(
    entry: &CatalogEntry,
    kind: dishdb_core::ErrorKind,
    message: String,
) -> ItemFailure {
    ItemFailure {
        item: entry.name.clone(),
        id: Some(entry.id),
        kind,
        message,
    }
}

/// The catalog entry an imported candidate becomes.
fn new_entry_from(candidate: &CandidateArticle) -> NewCatalogEntry {
    let region = infer_region(&candidate.category_tags);
    NewCatalogEntry {
        name: candidate.display_title(),
        description: candidate.description.clone(),
        image_url: candidate.image_url.clone(),
        wiki_url: Some(candidate.wiki_url.clone()),
        categories: candidate.category_tags.clone(),
        country_id: region.country_id,
        country_name: region.country_name,
        region: region.region,
        ..NewCatalogEntry::default()
    }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
