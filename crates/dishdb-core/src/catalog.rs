//! The catalog store seam.
//!
//! The document store itself lives outside this workspace's core; everything
//! that reads or writes dishes goes through [`CatalogStore`]. `dishdb-db`
//! provides the Postgres implementation and [`MemoryCatalog`] is the
//! in-process one used by tests and previews.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use crate::entry::{CatalogEntry, EntryId, EntryPatch, NewCatalogEntry};
use crate::error::CatalogError;

pub trait CatalogStore {
    /// Every entry, ordered by name.
    fn list_entries(&self) -> impl Future<Output = Result<Vec<CatalogEntry>, CatalogError>> + Send;

    /// One entry by id; [`CatalogError::NotFound`] when absent.
    fn get_entry(
        &self,
        id: EntryId,
    ) -> impl Future<Output = Result<CatalogEntry, CatalogError>> + Send;

    /// Validates and inserts a new entry.
    fn create_entry(
        &self,
        new: &NewCatalogEntry,
    ) -> impl Future<Output = Result<CatalogEntry, CatalogError>> + Send;

    /// Applies a field-level patch; [`CatalogError::NotFound`] when absent.
    fn update_entry(
        &self,
        id: EntryId,
        patch: &EntryPatch,
    ) -> impl Future<Output = Result<CatalogEntry, CatalogError>> + Send;

    /// Entries whose name starts with `prefix` (case-insensitive), by name.
    fn find_by_name_prefix(
        &self,
        prefix: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<CatalogEntry>, CatalogError>> + Send;

    fn count_entries(&self) -> impl Future<Output = Result<usize, CatalogError>> + Send;
}

/// In-process catalog. Counts writes so callers can assert a dry run did none.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    entries: Mutex<Vec<CatalogEntry>>,
    writes: AtomicUsize,
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the catalog without counting the inserts as writes.
    #[must_use]
    pub fn with_entries(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of successful `create_entry` + `update_entry` calls.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<CatalogEntry>>, CatalogError> {
        self.entries
            .lock()
            .map_err(|_| CatalogError::Backend("memory catalog lock poisoned".to_string()))
    }
}

impl CatalogStore for MemoryCatalog {
    async fn list_entries(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        let mut entries = self.lock()?.clone();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn get_entry(&self, id: EntryId) -> Result<CatalogEntry, CatalogError> {
        self.lock()?
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound { id: id.to_string() })
    }

    async fn create_entry(&self, new: &NewCatalogEntry) -> Result<CatalogEntry, CatalogError> {
        new.validate()?;
        let entry = CatalogEntry::from_new(Uuid::new_v4(), new, Utc::now());
        self.lock()?.push(entry.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(entry)
    }

    async fn update_entry(
        &self,
        id: EntryId,
        patch: &EntryPatch,
    ) -> Result<CatalogEntry, CatalogError> {
        let mut entries = self.lock()?;
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CatalogError::NotFound { id: id.to_string() })?;
        entry.apply_patch(patch, Utc::now());
        let updated = entry.clone();
        drop(entries);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(updated)
    }

    async fn find_by_name_prefix(
        &self,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<CatalogEntry>, CatalogError> {
        let prefix = prefix.to_lowercase();
        let mut matches: Vec<CatalogEntry> = self
            .lock()?
            .iter()
            .filter(|e| e.name.to_lowercase().starts_with(&prefix))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        matches.truncate(limit);
        Ok(matches)
    }

    async fn count_entries(&self) -> Result<usize, CatalogError> {
        Ok(self.lock()?.len())
    }
}
