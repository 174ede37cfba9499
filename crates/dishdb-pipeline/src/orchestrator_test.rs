use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dishdb_core::{CatalogError, ErrorKind, MemoryCatalog, NutritionInfo, NutritionSource};
use dishdb_nutrition::{CircuitBreaker, NutritionError};
use dishdb_wiki::{MemberArticle, MembersPage, PageSummary, WikiError};

use super::*;

#[derive(Default)]
struct FakeWiki {
    members: HashMap<String, Vec<String>>,
    summaries: HashMap<String, PageSummary>,
    failing: HashSet<String>,
    summary_calls: AtomicUsize,
}

impl FakeWiki {
    fn category(mut self, name: &str, titles: &[&str]) -> Self {
        self.members.insert(
            name.to_string(),
            titles.iter().map(ToString::to_string).collect(),
        );
        self
    }

    fn summary(mut self, title: &str, extract: &str, categories: &[&str]) -> Self {
        self.summaries.insert(
            title.to_string(),
            PageSummary {
                title: title.to_string(),
                page_id: 1,
                extract: Some(extract.to_string()),
                thumbnail: Some(format!("https://img.test/{}.jpg", title.replace(' ', "_"))),
                url: Some(format!("https://wiki.test/wiki/{}", title.replace(' ', "_"))),
                categories: categories.iter().map(ToString::to_string).collect(),
            },
        );
        self
    }

    fn with_summary(mut self, summary: PageSummary) -> Self {
        self.summaries.insert(summary.title.clone(), summary);
        self
    }

    fn failing(mut self, title: &str) -> Self {
        self.failing.insert(title.to_string());
        self
    }
}

impl Encyclopedia for FakeWiki {
    async fn category_members(
        &self,
        category: &str,
        _cursor: Option<&str>,
    ) -> Result<MembersPage, WikiError> {
        let titles = self.members.get(category).cloned().unwrap_or_default();
        Ok(MembersPage {
            articles: titles
                .into_iter()
                .zip(1..)
                .map(|(title, page_id)| MemberArticle { title, page_id })
                .collect(),
            subcategories: vec![],
            next_cursor: None,
        })
    }

    async fn page_summary(&self, title: &str) -> Result<Option<PageSummary>, WikiError> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(title) {
            return Err(WikiError::Api {
                code: "internal_api_error".into(),
                info: "boom".into(),
            });
        }
        Ok(self.summaries.get(title).cloned())
    }

    fn article_url(&self, title: &str) -> String {
        format!("https://wiki.test/wiki/{}", title.replace(' ', "_"))
    }
}

/// A nutrition database that never matches.
struct Silent;

impl NutritionProvider for Silent {
    fn source(&self) -> NutritionSource {
        NutritionSource::OpenFoodFacts
    }

    async fn lookup(&self, _query: &str) -> Result<Option<NutritionInfo>, NutritionError> {
        Ok(None)
    }
}

fn cascade() -> NutritionCascade<Silent, Silent> {
    NutritionCascade::new(
        Some(Silent),
        None,
        Arc::new(CircuitBreaker::new("usda", Duration::from_secs(3600))),
    )
}

fn config() -> PipelineConfig {
    PipelineConfig {
        root_categories: vec!["Ghanaian cuisine".to_string()],
        import_max_results: 100,
        weights: ScoringWeights::default(),
        pacing: Pacing::none(),
        min_description_len: MIN_DESCRIPTION_LEN,
    }
}

fn entries(names: &[&str]) -> Vec<CatalogEntry> {
    names
        .iter()
        .map(|name| {
            let new = NewCatalogEntry {
                name: (*name).to_string(),
                ..NewCatalogEntry::default()
            };
            CatalogEntry::from_new(EntryId::new_v4(), &new, Utc::now())
        })
        .collect()
}

fn existing(names: &[&str]) -> MemoryCatalog {
    MemoryCatalog::with_entries(entries(names))
}

/// Waakye scores 100, Kenkey 68, Kelewele has no page (40) and the Red red
/// lookup fails (30). Jollof rice and Banku are already catalogued and the
/// cowpea article is botanical.
fn ghana_wiki() -> FakeWiki {
    FakeWiki::default()
        .category(
            "Ghanaian cuisine",
            &[
                "Kenkey",
                "Jollof rice",
                "Waakye",
                "Banku",
                "Kelewele",
                "Red red",
                "Vigna unguiculata",
            ],
        )
        .summary(
            "Waakye",
            "Waakye is a traditional Ghanaian dish of rice and beans. It is eaten at breakfast.",
            &["Legume dishes"],
        )
        .summary("Kenkey", "Kenkey is a sourdough dumpling from Ghana.", &[])
        .failing("Red red")
}

fn pipeline(
    wiki: FakeWiki,
    catalog: MemoryCatalog,
) -> Pipeline<MemoryCatalog, FakeWiki, Silent, Silent> {
    Pipeline::new(catalog, wiki, cascade(), config())
}

fn discovery(min_confidence: u8, enrich: bool) -> DiscoveryOptions {
    DiscoveryOptions {
        depth: 0,
        max_results: 100,
        min_confidence,
        enrich,
    }
}

#[tokio::test]
async fn discover_scores_filters_and_sorts() {
    let p = pipeline(ghana_wiki(), existing(&["Jollof Rice", "Banku"]));

    let found = p.discover_missing(&discovery(60, true)).await.unwrap();

    let titles: Vec<&str> = found.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Waakye", "Kenkey"]);
    assert_eq!(found[0].confidence, Some(100));
    assert_eq!(found[1].confidence, Some(68));
    assert_eq!(
        found[0].image_url.as_deref(),
        Some("https://img.test/Waakye.jpg")
    );
    assert!(found[0].category_tags.contains("Legume dishes"));
    assert!(found[0].category_tags.contains("Ghanaian cuisine"));
}

#[tokio::test]
async fn missing_page_and_failed_lookup_get_fixed_scores() {
    let p = pipeline(ghana_wiki(), existing(&["Jollof Rice", "Banku"]));

    let found = p.discover_missing(&discovery(0, true)).await.unwrap();
    let score = |title: &str| {
        found
            .iter()
            .find(|c| c.title == title)
            .and_then(|c| c.confidence)
    };
    assert_eq!(score("Kelewele"), Some(40));
    assert_eq!(score("Red_red"), Some(30));
    assert_eq!(found.len(), 4);
}

#[tokio::test]
async fn discover_without_enrich_returns_unscored_candidates() {
    let wiki = ghana_wiki();
    let p = pipeline(wiki, existing(&["Jollof Rice", "Banku"]));

    let found = p.discover_missing(&discovery(99, false)).await.unwrap();

    assert_eq!(found.len(), 4);
    assert!(found.iter().all(|c| c.confidence.is_none()));
    assert_eq!(p.wiki.summary_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn dry_run_import_respects_limit_and_writes_nothing() {
    let p = pipeline(ghana_wiki(), existing(&["Jollof Rice", "Banku"]));
    let opts = ImportOptions {
        min_confidence: 60,
        limit: 1,
        depth: 0,
        dry_run: true,
    };

    let summary = p.bulk_import_discoveries(&opts).await.unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.imported, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 0);
    let item = &summary.details.items[0];
    assert_eq!(item.name, "Waakye");
    assert_eq!(item.country_name.as_deref(), Some("Ghana"));
    assert_eq!(item.region.as_deref(), Some("West Africa"));
    assert!(item.id.is_none());
    assert_eq!(p.catalog().write_count(), 0);
}

#[tokio::test]
async fn live_import_creates_entries_with_region() {
    let p = pipeline(ghana_wiki(), existing(&["Jollof Rice", "Banku"]));
    let opts = ImportOptions {
        min_confidence: 60,
        limit: 10,
        depth: 0,
        dry_run: false,
    };

    let summary = p.bulk_import_discoveries(&opts).await.unwrap();

    assert_eq!(summary.imported, 2);
    assert_eq!(summary.skipped, 0);
    assert!(summary.details.items.iter().all(|i| i.id.is_some()));
    assert_eq!(p.catalog().write_count(), 2);

    let waakye = p
        .catalog()
        .find_by_name_prefix("waakye", 1)
        .await
        .unwrap()
        .remove(0);
    assert_eq!(waakye.country_id.as_deref(), Some("ghana"));
    assert_eq!(
        waakye.wiki_url.as_deref(),
        Some("https://wiki.test/wiki/Waakye")
    );
    assert!(waakye.categories.contains("Legume dishes"));
    assert!(waakye.nutrition_info.is_none());
}

#[tokio::test]
async fn invalid_candidate_is_reported_in_dry_run() {
    let wiki = FakeWiki::default()
        .category("Ghanaian cuisine", &["Waakye"])
        .with_summary(PageSummary {
            title: "Waakye".into(),
            page_id: 1,
            extract: Some("Waakye is a traditional Ghanaian dish of rice and beans.".into()),
            thumbnail: Some("not-a-url".into()),
            url: None,
            categories: vec![],
        });
    let p = pipeline(wiki, MemoryCatalog::new());
    let opts = ImportOptions {
        min_confidence: 60,
        ..ImportOptions::default()
    };

    let summary = p.bulk_import_discoveries(&opts).await.unwrap();

    assert_eq!(summary.imported, 0);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.details.failures[0].kind, ErrorKind::Validation);
}

fn entry_with_calories(name: &str, calories: u32) -> CatalogEntry {
    let new = NewCatalogEntry {
        name: name.to_string(),
        nutrition_info: Some(NutritionInfo {
            calories: Some(calories),
            ..NutritionInfo::default()
        }),
        ..NewCatalogEntry::default()
    };
    CatalogEntry::from_new(EntryId::new_v4(), &new, Utc::now())
}

fn nutrition_catalog() -> MemoryCatalog {
    let mut seeded = entries(&["Jollof Rice", "Zzyzx stew"]);
    seeded.push(entry_with_calories("Banku", 300));
    MemoryCatalog::with_entries(seeded)
}

#[tokio::test]
async fn nutrition_dry_run_reports_sources_without_writing() {
    let p = pipeline(FakeWiki::default(), nutrition_catalog());

    let summary = p
        .bulk_enrich_nutrition(&EnrichOptions::default())
        .await
        .unwrap();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.enriched, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(
        summary.details.by_source.get(&NutritionSource::Reference),
        Some(&1)
    );
    assert_eq!(
        summary.details.by_source.get(&NutritionSource::ManualProfile),
        Some(&1)
    );
    assert!(summary.details.items.iter().all(|i| !i.applied));
    assert_eq!(p.catalog().write_count(), 0);
}

#[tokio::test]
async fn nutrition_live_run_updates_entries() {
    let p = pipeline(FakeWiki::default(), nutrition_catalog());
    let opts = EnrichOptions {
        dry_run: false,
        ..EnrichOptions::default()
    };

    let summary = p.bulk_enrich_nutrition(&opts).await.unwrap();

    assert_eq!(summary.enriched, 2);
    assert_eq!(p.catalog().write_count(), 2);
    let jollof = p
        .catalog()
        .find_by_name_prefix("jollof", 1)
        .await
        .unwrap()
        .remove(0);
    assert_eq!(jollof.nutrition_source, Some(NutritionSource::Reference));
    assert_eq!(
        jollof.nutrition_info.and_then(|n| n.calories),
        Some(360)
    );
    assert!(jollof.nutrition_enriched_at.is_some());
}

#[tokio::test]
async fn nutrition_without_any_match_is_skipped() {
    let catalog = existing(&["Zzyzx stew"]);
    let p = Pipeline::new(
        catalog,
        FakeWiki::default(),
        cascade().without_manual_profiles(),
        config(),
    );

    let summary = p
        .bulk_enrich_nutrition(&EnrichOptions::default())
        .await
        .unwrap();
    assert_eq!(summary.enriched, 0);
    assert_eq!(summary.skipped, 1);
}

#[tokio::test]
async fn encyclopedia_run_fills_only_missing_fields() {
    let mut seeded = entries(&["Egusi soup"]);
    seeded[0].description = Some(
        "Egusi soup is a soup thickened with ground melon seeds, common in West Africa.".into(),
    );
    seeded[0].image_url = Some("https://img.test/egusi.jpg".into());
    seeded.extend(entries(&["Fufu", "Mystery dish"]));
    let catalog = MemoryCatalog::with_entries(seeded);

    let wiki = FakeWiki::default().summary(
        "Fufu",
        "Fufu is a dough-like staple food. It is eaten with soup.",
        &[],
    );
    let p = pipeline(wiki, catalog);
    let opts = EnrichOptions {
        dry_run: false,
        ..EnrichOptions::default()
    };

    let summary = p.bulk_enrich_from_wikipedia(&opts).await.unwrap();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.enriched, 1);
    assert_eq!(summary.skipped, 2);
    assert!(summary.details.by_source.is_empty());
    assert_eq!(
        summary.details.items[0].fields,
        vec!["description", "imageUrl", "wikiUrl"]
    );

    let fufu = p
        .catalog()
        .find_by_name_prefix("fufu", 1)
        .await
        .unwrap()
        .remove(0);
    assert!(fufu
        .description
        .as_deref()
        .is_some_and(|d| d.starts_with("Fufu is a dough-like staple food.")));
    assert_eq!(fufu.image_url.as_deref(), Some("https://img.test/Fufu.jpg"));
    assert!(fufu.wiki_enriched_at.is_some());
}

#[tokio::test]
async fn repeated_encyclopedia_runs_write_nothing_new() {
    let mut seeded = entries(&["Fufu", "Kenkey"]);
    seeded[0].description = Some("A staple dough.".into());
    seeded[0].image_url = Some("https://img.test/fufu.jpg".into());
    seeded[0].wiki_url = Some("https://wiki.test/wiki/Fufu".into());
    seeded[1].description = Some("Sour dumpling.".into());
    seeded[1].image_url = Some("https://img.test/kenkey.jpg".into());
    let wiki = FakeWiki::default()
        .summary("Fufu", "Fufu is a dough-like staple food.", &[])
        .summary("Kenkey", "Kenkey is a sourdough dumpling.", &[]);
    let p = pipeline(wiki, MemoryCatalog::with_entries(seeded));
    let opts = EnrichOptions {
        dry_run: false,
        ..EnrichOptions::default()
    };

    let first = p.bulk_enrich_from_wikipedia(&opts).await.unwrap();
    assert_eq!(first.enriched, 1);
    assert_eq!(first.skipped, 1);
    assert_eq!(first.details.items[0].name, "Kenkey");
    assert_eq!(first.details.items[0].fields, vec!["wikiUrl"]);
    assert_eq!(p.catalog().write_count(), 1);

    let second = p.bulk_enrich_from_wikipedia(&opts).await.unwrap();
    assert_eq!(second.enriched, 0);
    assert_eq!(second.skipped, 2);
    assert!(second.details.items.is_empty());
    assert_eq!(p.catalog().write_count(), 1);

    let fufu = p
        .catalog()
        .find_by_name_prefix("fufu", 1)
        .await
        .unwrap()
        .remove(0);
    assert!(fufu.wiki_enriched_at.is_none());
}

#[tokio::test]
async fn encyclopedia_lookup_failure_is_recorded() {
    let catalog = existing(&["Red red"]);
    let p = pipeline(FakeWiki::default().failing("Red red"), catalog);

    let summary = p
        .bulk_enrich_from_wikipedia(&EnrichOptions::default())
        .await
        .unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.details.failures[0].item, "Red red");
    assert_eq!(summary.details.failures[0].kind, ErrorKind::Permanent);
}

#[tokio::test]
async fn single_entry_triggers_surface_not_found() {
    let p = pipeline(FakeWiki::default(), MemoryCatalog::new());

    let err = p
        .enrich_entry_nutrition(EntryId::new_v4(), false)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Catalog(CatalogError::NotFound { .. })
    ));
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = p
        .enrich_entry_from_encyclopedia(EntryId::new_v4(), true)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn single_entry_nutrition_dry_run_leaves_entry_alone() {
    let catalog = existing(&["Jollof Rice"]);
    let id = catalog.list_entries().await.unwrap()[0].id;
    let p = pipeline(FakeWiki::default(), catalog);

    let item = p.enrich_entry_nutrition(id, true).await.unwrap().unwrap();
    assert_eq!(item.source, Some(NutritionSource::Reference));
    assert!(!item.applied);
    assert_eq!(p.catalog().write_count(), 0);

    let item = p.enrich_entry_nutrition(id, false).await.unwrap().unwrap();
    assert!(item.applied);
    assert!(!p.catalog().get_entry(id).await.unwrap().needs_nutrition());
}

#[tokio::test]
async fn single_entry_encyclopedia_without_page_is_none() {
    let catalog = existing(&["Mystery dish"]);
    let id = catalog.list_entries().await.unwrap()[0].id;
    let p = pipeline(FakeWiki::default(), catalog);

    assert!(p
        .enrich_entry_from_encyclopedia(id, false)
        .await
        .unwrap()
        .is_none());
}
