//! Database operations for the `catalog_entries` table.

use chrono::{DateTime, Utc};
use dishdb_core::{
    CatalogEntry, CatalogError, CatalogStore, EntryId, EntryPatch, NewCatalogEntry,
    NutritionInfo, NutritionSource,
};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

const COLUMNS: &str = "id, name, description, image_url, wiki_url, nutrition_info, \
     nutrition_source, nutrition_enriched_at, wiki_enriched_at, categories, tags, \
     country_id, country_name, region, created_at, updated_at";

/// A row from the `catalog_entries` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CatalogRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub wiki_url: Option<String>,
    pub nutrition_info: Option<Json<NutritionInfo>>,
    pub nutrition_source: Option<String>,
    pub nutrition_enriched_at: Option<DateTime<Utc>>,
    pub wiki_enriched_at: Option<DateTime<Utc>>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub country_id: Option<String>,
    pub country_name: Option<String>,
    pub region: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CatalogRow> for CatalogEntry {
    type Error = DbError;

    fn try_from(row: CatalogRow) -> Result<Self, Self::Error> {
        let nutrition_source = row
            .nutrition_source
            .map(|s| {
                NutritionSource::parse(&s).ok_or(DbError::InvalidColumn {
                    column: "nutrition_source",
                    value: s,
                })
            })
            .transpose()?;

        Ok(CatalogEntry {
            id: row.id,
            name: row.name,
            description: row.description,
            image_url: row.image_url,
            wiki_url: row.wiki_url,
            nutrition_info: row.nutrition_info.map(|Json(n)| n),
            nutrition_source,
            nutrition_enriched_at: row.nutrition_enriched_at,
            wiki_enriched_at: row.wiki_enriched_at,
            categories: row.categories.into_iter().collect(),
            tags: row.tags.into_iter().collect(),
            country_id: row.country_id,
            country_name: row.country_name,
            region: row.region,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_entries(rows: Vec<CatalogRow>) -> Result<Vec<CatalogEntry>, DbError> {
    rows.into_iter().map(CatalogEntry::try_from).collect()
}

/// `LIKE` pattern matching names that start with `prefix`, case-folded.
fn prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns every entry, ordered by name.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, or
/// [`DbError::InvalidColumn`] for an unreadable stored value.
pub async fn list_catalog_entries(pool: &PgPool) -> Result<Vec<CatalogEntry>, DbError> {
    let rows = sqlx::query_as::<_, CatalogRow>(&format!(
        "SELECT {COLUMNS} FROM catalog_entries ORDER BY name"
    ))
    .fetch_all(pool)
    .await?;

    into_entries(rows)
}

/// Returns one entry by id, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_catalog_entry(
    pool: &PgPool,
    id: EntryId,
) -> Result<Option<CatalogEntry>, DbError> {
    let row = sqlx::query_as::<_, CatalogRow>(&format!(
        "SELECT {COLUMNS} FROM catalog_entries WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(CatalogEntry::try_from).transpose()
}

/// Inserts a new entry with a fresh id and returns the stored row.
///
/// Does not validate; [`PgCatalog::create_entry`] does.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_catalog_entry(
    pool: &PgPool,
    new: &NewCatalogEntry,
) -> Result<CatalogEntry, DbError> {
    let categories: Vec<&str> = new.categories.iter().map(String::as_str).collect();
    let tags: Vec<&str> = new.tags.iter().map(String::as_str).collect();

    let row = sqlx::query_as::<_, CatalogRow>(&format!(
        "INSERT INTO catalog_entries \
             (id, name, description, image_url, wiki_url, nutrition_info, nutrition_source, \
              categories, tags, country_id, country_name, region) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
         RETURNING {COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(new.name.trim())
    .bind(new.description.as_deref())
    .bind(new.image_url.as_deref())
    .bind(new.wiki_url.as_deref())
    .bind(new.nutrition_info.as_ref().map(Json))
    .bind(new.nutrition_source.map(NutritionSource::as_str))
    .bind(categories)
    .bind(tags)
    .bind(new.country_id.as_deref())
    .bind(new.country_name.as_deref())
    .bind(new.region.as_deref())
    .fetch_one(pool)
    .await?;

    CatalogEntry::try_from(row)
}

/// Applies a field-level patch. Fields left `None` in the patch keep their
/// stored value. Returns `None` if no entry has the id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the update fails.
pub async fn update_catalog_entry(
    pool: &PgPool,
    id: EntryId,
    patch: &EntryPatch,
) -> Result<Option<CatalogEntry>, DbError> {
    let row = sqlx::query_as::<_, CatalogRow>(&format!(
        "UPDATE catalog_entries SET \
             description = COALESCE($2, description), \
             image_url = COALESCE($3, image_url), \
             wiki_url = COALESCE($4, wiki_url), \
             nutrition_info = COALESCE($5, nutrition_info), \
             nutrition_source = COALESCE($6, nutrition_source), \
             nutrition_enriched_at = COALESCE($7, nutrition_enriched_at), \
             wiki_enriched_at = COALESCE($8, wiki_enriched_at), \
             updated_at = NOW() \
         WHERE id = $1 \
         RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(patch.description.as_deref())
    .bind(patch.image_url.as_deref())
    .bind(patch.wiki_url.as_deref())
    .bind(patch.nutrition_info.as_ref().map(Json))
    .bind(patch.nutrition_source.map(NutritionSource::as_str))
    .bind(patch.nutrition_enriched_at)
    .bind(patch.wiki_enriched_at)
    .fetch_optional(pool)
    .await?;

    row.map(CatalogEntry::try_from).transpose()
}

/// Returns up to `limit` entries whose name starts with `prefix`,
/// case-insensitively, ordered by name.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_catalog_entries_by_prefix(
    pool: &PgPool,
    prefix: &str,
    limit: usize,
) -> Result<Vec<CatalogEntry>, DbError> {
    let rows = sqlx::query_as::<_, CatalogRow>(&format!(
        "SELECT {COLUMNS} FROM catalog_entries \
         WHERE lower(name) LIKE $1 ESCAPE '\\' \
         ORDER BY name \
         LIMIT $2"
    ))
    .bind(prefix_pattern(prefix))
    .bind(i64::try_from(limit).unwrap_or(i64::MAX))
    .fetch_all(pool)
    .await?;

    into_entries(rows)
}

/// Returns the number of entries.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_catalog_entries(pool: &PgPool) -> Result<usize, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM catalog_entries")
        .fetch_one(pool)
        .await?;
    Ok(usize::try_from(count).unwrap_or(0))
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// [`CatalogStore`] over a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl CatalogStore for PgCatalog {
    async fn list_entries(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        Ok(list_catalog_entries(&self.pool).await?)
    }

    async fn get_entry(&self, id: EntryId) -> Result<CatalogEntry, CatalogError> {
        get_catalog_entry(&self.pool, id)
            .await?
            .ok_or_else(|| CatalogError::NotFound { id: id.to_string() })
    }

    async fn create_entry(&self, new: &NewCatalogEntry) -> Result<CatalogEntry, CatalogError> {
        new.validate()?;
        Ok(insert_catalog_entry(&self.pool, new).await?)
    }

    async fn update_entry(
        &self,
        id: EntryId,
        patch: &EntryPatch,
    ) -> Result<CatalogEntry, CatalogError> {
        update_catalog_entry(&self.pool, id, patch)
            .await?
            .ok_or_else(|| CatalogError::NotFound { id: id.to_string() })
    }

    async fn find_by_name_prefix(
        &self,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<CatalogEntry>, CatalogError> {
        Ok(find_catalog_entries_by_prefix(&self.pool, prefix, limit).await?)
    }

    async fn count_entries(&self) -> Result<usize, CatalogError> {
        Ok(count_catalog_entries(&self.pool).await?)
    }
}
