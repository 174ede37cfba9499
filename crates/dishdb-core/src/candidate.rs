use std::collections::BTreeSet;

use serde::Serialize;

use crate::names::display_title;

/// An encyclopedia article considered for import. Lives for one discovery run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateArticle {
    /// Underscore form (`"Jollof_rice"`), the provider's identity key.
    pub title: String,
    pub page_id: i64,
    pub wiki_url: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Category names (without the `Category:` prefix) it was found under.
    pub category_tags: BTreeSet<String>,
    /// 0..=100 once scored.
    pub confidence: Option<u8>,
}

impl CandidateArticle {
    #[must_use]
    pub fn new(title: &str, page_id: i64, wiki_url: String) -> Self {
        Self {
            title: crate::names::title_key(title),
            page_id,
            wiki_url,
            description: None,
            image_url: None,
            category_tags: BTreeSet::new(),
            confidence: None,
        }
    }

    /// Title with spaces, as shown to people and stored as the entry name.
    #[must_use]
    pub fn display_title(&self) -> String {
        display_title(&self.title)
    }

    /// Unscored candidates are never eligible for auto-import.
    #[must_use]
    pub fn meets_confidence(&self, min_confidence: u8) -> bool {
        self.confidence.is_some_and(|c| c >= min_confidence)
    }
}
