//! Catalog entry documents and the write shapes used against the store.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CatalogError;
use crate::nutrition::{NutritionInfo, NutritionSource};

pub type EntryId = Uuid;

const MAX_NAME_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 5_000;
const MAX_CALORIES: u32 = 5_000;

/// A dish in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: EntryId,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub wiki_url: Option<String>,
    pub nutrition_info: Option<NutritionInfo>,
    pub nutrition_source: Option<NutritionSource>,
    pub nutrition_enriched_at: Option<DateTime<Utc>>,
    pub wiki_enriched_at: Option<DateTime<Utc>>,
    pub categories: BTreeSet<String>,
    pub tags: BTreeSet<String>,
    pub country_id: Option<String>,
    pub country_name: Option<String>,
    pub region: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CatalogEntry {
    /// `true` when the entry has no positive calorie count recorded.
    #[must_use]
    pub fn needs_nutrition(&self) -> bool {
        !self
            .nutrition_info
            .as_ref()
            .is_some_and(NutritionInfo::has_calories)
    }

    /// `true` when the description is missing or shorter than
    /// `min_description_len` characters, or the image is missing.
    #[must_use]
    pub fn needs_encyclopedia(&self, min_description_len: usize) -> bool {
        let short_description = self
            .description
            .as_deref()
            .is_none_or(|d| d.trim().chars().count() < min_description_len);
        let missing_image = self.image_url.as_deref().is_none_or(|u| u.trim().is_empty());
        short_description || missing_image
    }

    /// Builds a fresh entry from a validated [`NewCatalogEntry`].
    #[must_use]
    pub fn from_new(id: EntryId, new: &NewCatalogEntry, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name.trim().to_owned(),
            description: new.description.clone(),
            image_url: new.image_url.clone(),
            wiki_url: new.wiki_url.clone(),
            nutrition_info: new.nutrition_info.clone(),
            nutrition_source: new.nutrition_source,
            nutrition_enriched_at: None,
            wiki_enriched_at: None,
            categories: new.categories.clone(),
            tags: new.tags.clone(),
            country_id: new.country_id.clone(),
            country_name: new.country_name.clone(),
            region: new.region.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a field-level patch. Fields absent from the patch are untouched.
    pub fn apply_patch(&mut self, patch: &EntryPatch, now: DateTime<Utc>) {
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(image_url) = &patch.image_url {
            self.image_url = Some(image_url.clone());
        }
        if let Some(wiki_url) = &patch.wiki_url {
            self.wiki_url = Some(wiki_url.clone());
        }
        if let Some(nutrition) = &patch.nutrition_info {
            self.nutrition_info = Some(nutrition.clone());
        }
        if let Some(source) = patch.nutrition_source {
            self.nutrition_source = Some(source);
        }
        if let Some(at) = patch.nutrition_enriched_at {
            self.nutrition_enriched_at = Some(at);
        }
        if let Some(at) = patch.wiki_enriched_at {
            self.wiki_enriched_at = Some(at);
        }
        self.updated_at = now;
    }
}

/// Input for creating a catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCatalogEntry {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub wiki_url: Option<String>,
    pub nutrition_info: Option<NutritionInfo>,
    pub nutrition_source: Option<NutritionSource>,
    pub categories: BTreeSet<String>,
    pub tags: BTreeSet<String>,
    pub country_id: Option<String>,
    pub country_name: Option<String>,
    pub region: Option<String>,
}

impl NewCatalogEntry {
    /// Rejects malformed input before it reaches the store.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] describing the first problem found.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CatalogError::Validation(
                "name must be non-empty".to_string(),
            ));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(CatalogError::Validation(format!(
                "name '{name}' exceeds {MAX_NAME_LEN} characters"
            )));
        }
        if self
            .description
            .as_deref()
            .is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LEN)
        {
            return Err(CatalogError::Validation(format!(
                "description for '{name}' exceeds {MAX_DESCRIPTION_LEN} characters"
            )));
        }
        for (field, url) in [("imageUrl", &self.image_url), ("wikiUrl", &self.wiki_url)] {
            if let Some(url) = url {
                if !(url.starts_with("https://") || url.starts_with("http://")) {
                    return Err(CatalogError::Validation(format!(
                        "{field} for '{name}' must be an http(s) URL, got '{url}'"
                    )));
                }
            }
        }
        if let Some(calories) = self.nutrition_info.as_ref().and_then(|n| n.calories) {
            if calories > MAX_CALORIES {
                return Err(CatalogError::Validation(format!(
                    "calories for '{name}' out of range: {calories}"
                )));
            }
        }
        Ok(())
    }
}

/// Field-level update. `None` means "leave the stored value alone".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPatch {
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub wiki_url: Option<String>,
    pub nutrition_info: Option<NutritionInfo>,
    pub nutrition_source: Option<NutritionSource>,
    pub nutrition_enriched_at: Option<DateTime<Utc>>,
    pub wiki_enriched_at: Option<DateTime<Utc>>,
}

impl EntryPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
