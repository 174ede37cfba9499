//! Description and image enrichment from an encyclopedia page summary.

use chrono::{DateTime, Utc};
use dishdb_core::names::strip_parenthetical;
use dishdb_core::{CatalogEntry, EntryPatch};
use dishdb_wiki::{Encyclopedia, WikiError};

const DESCRIPTION_SENTENCES: usize = 2;

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// The first `n` period-terminated sentences of `text`, whitespace
/// collapsed. Text with fewer sentences is returned whole, with a final
/// period added if missing.
#[must_use]
pub fn first_sentences(text: &str, n: usize) -> String {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut end = None;
    let mut count = 0;
    for (i, c) in text.char_indices() {
        if c != '.' {
            continue;
        }
        if text[i + 1..].chars().next().is_none_or(char::is_whitespace) {
            count += 1;
            if count == n {
                end = Some(i + 1);
                break;
            }
        }
    }
    let mut out = end.map_or_else(|| text.clone(), |e| text[..e].to_owned());
    if !out.is_empty() && !out.ends_with('.') {
        out.push('.');
    }
    out
}

/// Builds the update that fills `entry` from its encyclopedia page.
///
/// The description and image are only filled when empty, and the canonical
/// page URL only when it differs from the stored one. The enrichment
/// timestamp is set only alongside a content change, so an entry that is
/// already up to date yields an empty patch. `Ok(None)` when the
/// encyclopedia has no page for the entry's name.
///
/// # Errors
///
/// Returns [`WikiError`] when the summary request fails.
pub async fn enrich_from_encyclopedia<E: Encyclopedia + Sync>(
    wiki: &E,
    entry: &CatalogEntry,
    now: DateTime<Utc>,
) -> Result<Option<EntryPatch>, WikiError> {
    let title = strip_parenthetical(&entry.name);
    let Some(summary) = wiki.page_summary(&title).await? else {
        tracing::debug!(entry = %entry.name, "no encyclopedia page");
        return Ok(None);
    };

    let mut patch = EntryPatch::default();
    if is_blank(entry.description.as_deref()) {
        patch.description = summary
            .extract
            .as_deref()
            .map(|e| first_sentences(e, DESCRIPTION_SENTENCES))
            .filter(|d| !d.is_empty());
    }
    if is_blank(entry.image_url.as_deref()) {
        patch.image_url = summary.thumbnail;
    }
    if summary.url.is_some() && summary.url != entry.wiki_url {
        patch.wiki_url = summary.url;
    }
    if !patch.is_empty() {
        patch.wiki_enriched_at = Some(now);
    }

    Ok(Some(patch))
}

/// Names of the content fields a patch sets, for summaries.
#[must_use]
pub fn changed_fields(patch: &EntryPatch) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if patch.description.is_some() {
        fields.push("description");
    }
    if patch.image_url.is_some() {
        fields.push("imageUrl");
    }
    if patch.wiki_url.is_some() {
        fields.push("wikiUrl");
    }
    if patch.nutrition_info.is_some() {
        fields.push("nutritionInfo");
    }
    fields
}
