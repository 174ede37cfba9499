//! Breadth-first crawl of the encyclopedia's category graph.
//!
//! Each root is walked level by level from depth 0. Subcategories are only
//! entered below `depth`, no category is fetched twice in one crawl, and the
//! crawl stops the moment `max_results` distinct articles are collected.
//! A title reached again through another category gets that category added
//! to its tags.

use std::collections::{HashMap, HashSet, VecDeque};

use dishdb_core::names::{display_title, title_key};
use dishdb_core::CandidateArticle;
use dishdb_wiki::Encyclopedia;

use crate::options::Pacing;

/// Pages fetched per category before giving up on its cursor.
pub const MAX_PAGES_PER_CATEGORY: usize = 50;

/// Mutable state of one crawl invocation.
#[derive(Debug, Default)]
struct CrawlState {
    visited: HashSet<String>,
    collected: Vec<CandidateArticle>,
    /// Title key to index into `collected`.
    by_title: HashMap<String, usize>,
    max_results: usize,
}

impl CrawlState {
    fn new(max_results: usize) -> Self {
        Self {
            max_results,
            ..Self::default()
        }
    }

    fn is_full(&self) -> bool {
        self.collected.len() >= self.max_results
    }

    /// Returns `false` when the category was already visited.
    fn visit(&mut self, category: &str) -> bool {
        self.visited.insert(category_key(category))
    }

    fn was_visited(&self, category: &str) -> bool {
        self.visited.contains(&category_key(category))
    }

    fn add(&mut self, title: &str, page_id: i64, wiki_url: String, category: &str) {
        let key = title_key(title);
        if let Some(&idx) = self.by_title.get(&key) {
            self.collected[idx].category_tags.insert(category.to_owned());
            return;
        }
        let mut candidate = CandidateArticle::new(title, page_id, wiki_url);
        candidate.category_tags.insert(category.to_owned());
        self.by_title.insert(key, self.collected.len());
        self.collected.push(candidate);
    }
}

fn category_key(category: &str) -> String {
    display_title(category).trim().to_lowercase()
}

/// Collects up to `max_results` candidate articles reachable from `roots`.
///
/// A category whose fetch fails keeps the articles already read from it but
/// its subcategories are not entered; the crawl carries on with the rest.
pub async fn crawl<E: Encyclopedia + Sync>(
    wiki: &E,
    roots: &[String],
    depth: u32,
    max_results: usize,
    pacing: &Pacing,
) -> Vec<CandidateArticle> {
    let mut state = CrawlState::new(max_results);
    if max_results == 0 {
        return state.collected;
    }

    for root in roots {
        let mut queue: VecDeque<(String, u32)> = VecDeque::from([(root.clone(), 0)]);

        while let Some((category, level)) = queue.pop_front() {
            if !state.visit(&category) {
                continue;
            }

            let Some(subcategories) = crawl_category(wiki, &category, &mut state, pacing).await
            else {
                if state.is_full() {
                    tracing::info!(collected = state.collected.len(), "crawl reached max_results");
                    return state.collected;
                }
                continue;
            };

            if level < depth {
                for sub in subcategories {
                    if !state.was_visited(&sub) {
                        queue.push_back((sub, level + 1));
                    }
                }
            }
        }
    }

    tracing::info!(
        collected = state.collected.len(),
        categories = state.visited.len(),
        "crawl finished"
    );
    state.collected
}

/// Pages through one category. Returns its subcategories, or `None` when the
/// crawl is full or the category failed.
async fn crawl_category<E: Encyclopedia + Sync>(
    wiki: &E,
    category: &str,
    state: &mut CrawlState,
    pacing: &Pacing,
) -> Option<Vec<String>> {
    let mut subcategories = Vec::new();
    let mut cursor: Option<String> = None;

    for page_no in 1..=MAX_PAGES_PER_CATEGORY {
        let page = match wiki.category_members(category, cursor.as_deref()).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(category, error = %e, "category fetch failed, skipping subtree");
                return None;
            }
        };
        pacing.after_call().await;

        for article in page.articles {
            let url = wiki.article_url(&article.title);
            state.add(&article.title, article.page_id, url, category);
            if state.is_full() {
                return None;
            }
        }
        subcategories.extend(page.subcategories);

        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => return Some(subcategories),
        }

        if page_no == MAX_PAGES_PER_CATEGORY {
            tracing::warn!(
                category,
                pages = MAX_PAGES_PER_CATEGORY,
                "category page limit reached, ignoring remaining members"
            );
        }
    }

    Some(subcategories)
}

#[cfg(test)]
#[path = "crawler_test.rs"]
mod tests;
