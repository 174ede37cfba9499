//! Result summaries returned by bulk and single-entry runs.
//!
//! Counts are always present; `details` itemizes what was (or in a dry run
//! would have been) written and every per-item failure with its error kind.

use std::collections::BTreeMap;

use dishdb_core::{EntryId, ErrorKind, NutritionSource};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFailure {
    /// Entry name or candidate title.
    pub item: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntryId>,
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportItem {
    pub name: String,
    pub wiki_url: String,
    pub confidence: Option<u8>,
    pub country_name: Option<String>,
    pub region: Option<String>,
    /// Id of the created entry; absent in a dry run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntryId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDetails {
    pub items: Vec<ImportItem>,
    pub failures: Vec<ItemFailure>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Eligible candidates found by discovery.
    pub total: usize,
    /// Created entries, or would-be entries in a dry run.
    pub imported: usize,
    /// Eligible candidates beyond the limit.
    pub skipped: usize,
    pub failed: usize,
    pub dry_run: bool,
    pub details: ImportDetails,
}

impl ImportSummary {
    #[must_use]
    pub fn new(total: usize, dry_run: bool) -> Self {
        Self {
            total,
            dry_run,
            ..Self::default()
        }
    }

    pub fn record_import(&mut self, item: ImportItem) {
        self.imported += 1;
        self.details.items.push(item);
    }

    pub fn record_failure(&mut self, failure: ItemFailure) {
        self.failed += 1;
        self.details.failures.push(failure);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichItem {
    pub id: EntryId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<NutritionSource>,
    /// Content fields set by the update.
    pub fields: Vec<&'static str>,
    /// `false` in a dry run.
    pub applied: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichDetails {
    /// Entries enriched per nutrition source; empty for description runs.
    pub by_source: BTreeMap<NutritionSource, usize>,
    pub items: Vec<EnrichItem>,
    pub failures: Vec<ItemFailure>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichSummary {
    /// Entries in the catalog when the run started.
    pub total: usize,
    pub enriched: usize,
    /// Entries not needing enrichment, or for which no source answered.
    pub skipped: usize,
    pub failed: usize,
    pub dry_run: bool,
    pub details: EnrichDetails,
}

impl EnrichSummary {
    #[must_use]
    pub fn new(total: usize, dry_run: bool) -> Self {
        Self {
            total,
            dry_run,
            ..Self::default()
        }
    }

    pub fn record_enriched(&mut self, item: EnrichItem) {
        self.enriched += 1;
        if let Some(source) = item.source {
            *self.details.by_source.entry(source).or_default() += 1;
        }
        self.details.items.push(item);
    }

    pub fn record_failure(&mut self, failure: ItemFailure) {
        self.failed += 1;
        self.details.failures.push(failure);
    }
}
