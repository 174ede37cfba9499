//! Client for the encyclopedia's MediaWiki action API.
//!
//! Exposes the two queries the discovery pipeline needs (paged category
//! membership and page summaries) behind the [`Encyclopedia`] trait so the
//! crawler and scorer can run against an in-process fake in tests.

pub mod client;
pub mod encyclopedia;
pub mod error;
pub mod types;

pub use client::WikiClient;
pub use encyclopedia::Encyclopedia;
pub use error::WikiError;
pub use types::{MemberArticle, MembersPage, PageSummary};
