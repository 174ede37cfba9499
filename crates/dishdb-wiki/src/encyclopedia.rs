use std::future::Future;

use crate::error::WikiError;
use crate::types::{MembersPage, PageSummary};

/// The encyclopedia queries consumed by discovery and description enrichment.
pub trait Encyclopedia {
    /// One page of members of `category` (name without the `Category:`
    /// prefix). Pass the previous page's `next_cursor` to continue.
    fn category_members(
        &self,
        category: &str,
        cursor: Option<&str>,
    ) -> impl Future<Output = Result<MembersPage, WikiError>> + Send;

    /// Intro, thumbnail and categories for `title`. `Ok(None)` when the
    /// encyclopedia has no such page.
    fn page_summary(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<Option<PageSummary>, WikiError>> + Send;

    /// Canonical article URL for a title.
    fn article_url(&self, title: &str) -> String;
}
