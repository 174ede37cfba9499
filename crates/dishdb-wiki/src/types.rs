//! Encyclopedia response types.
//!
//! The public types ([`MembersPage`], [`PageSummary`]) are what the pipeline
//! consumes. The `Raw*` types model the `formatversion=2` JSON returned by
//! `api.php` and are converted at the client boundary.

use serde::Deserialize;

/// Namespace id of category pages.
pub(crate) const CATEGORY_NS: i64 = 14;
/// Namespace id of ordinary articles.
pub(crate) const ARTICLE_NS: i64 = 0;

const CATEGORY_PREFIX: &str = "Category:";

/// An article listed as a member of a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberArticle {
    /// Title with spaces, as the API returns it.
    pub title: String,
    pub page_id: i64,
}

/// One page of a category's members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembersPage {
    pub articles: Vec<MemberArticle>,
    /// Subcategory names without the `Category:` prefix.
    pub subcategories: Vec<String>,
    /// Cursor for the next page; `None` once the category is exhausted.
    pub next_cursor: Option<String>,
}

/// Intro text, thumbnail and visible categories of one article.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSummary {
    pub title: String,
    pub page_id: i64,
    /// Plain-text intro section.
    pub extract: Option<String>,
    pub thumbnail: Option<String>,
    /// Canonical article URL.
    pub url: Option<String>,
    /// Category names without the `Category:` prefix.
    pub categories: Vec<String>,
}

/// Strips the `Category:` prefix if present.
#[must_use]
pub fn strip_category_prefix(name: &str) -> &str {
    name.strip_prefix(CATEGORY_PREFIX).unwrap_or(name)
}

/// Adds the `Category:` prefix unless already present.
#[must_use]
pub fn category_title(name: &str) -> String {
    if name.starts_with(CATEGORY_PREFIX) {
        name.to_owned()
    } else {
        format!("{CATEGORY_PREFIX}{name}")
    }
}

// ---------------------------------------------------------------------------
// list=categorymembers
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct RawMembersResponse {
    #[serde(default, rename = "continue")]
    pub cont: Option<RawMembersContinue>,
    #[serde(default)]
    pub query: Option<RawMembersQuery>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawMembersContinue {
    #[serde(default)]
    pub cmcontinue: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawMembersQuery {
    #[serde(default)]
    pub categorymembers: Vec<RawMember>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawMember {
    pub pageid: i64,
    pub ns: i64,
    pub title: String,
}

impl From<RawMembersResponse> for MembersPage {
    fn from(raw: RawMembersResponse) -> Self {
        let mut page = MembersPage {
            next_cursor: raw.cont.and_then(|c| c.cmcontinue),
            ..MembersPage::default()
        };
        for member in raw.query.map(|q| q.categorymembers).unwrap_or_default() {
            match member.ns {
                CATEGORY_NS => page
                    .subcategories
                    .push(strip_category_prefix(&member.title).to_owned()),
                ARTICLE_NS => page.articles.push(MemberArticle {
                    title: member.title,
                    page_id: member.pageid,
                }),
                _ => {}
            }
        }
        page
    }
}

// ---------------------------------------------------------------------------
// prop=extracts|pageimages|categories|info
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct RawSummaryResponse {
    #[serde(default)]
    pub query: Option<RawSummaryQuery>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSummaryQuery {
    #[serde(default)]
    pub pages: Vec<RawPage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPage {
    #[serde(default)]
    pub pageid: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub missing: bool,
    #[serde(default)]
    pub invalid: bool,
    #[serde(default)]
    pub extract: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<RawThumbnail>,
    #[serde(default)]
    pub fullurl: Option<String>,
    #[serde(default)]
    pub categories: Vec<RawCategory>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawThumbnail {
    pub source: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCategory {
    pub title: String,
}

impl RawPage {
    /// `None` for missing or invalid titles.
    pub(crate) fn into_summary(self) -> Option<PageSummary> {
        if self.missing || self.invalid {
            return None;
        }
        let extract = self
            .extract
            .map(|e| e.trim().to_owned())
            .filter(|e| !e.is_empty());
        Some(PageSummary {
            title: self.title,
            page_id: self.pageid.unwrap_or_default(),
            extract,
            thumbnail: self.thumbnail.map(|t| t.source),
            url: self.fullurl,
            categories: self
                .categories
                .into_iter()
                .map(|c| strip_category_prefix(&c.title).to_owned())
                .collect(),
        })
    }
}
