//! HTTP client for the MediaWiki action API (`/w/api.php`).
//!
//! Requests go through [`HttpFetcher`], so they share its user agent, retry
//! policy and status mapping. API-level failures arrive as a 200 with an
//! `{"error": {...}}` envelope and are surfaced as [`WikiError::Api`].

use dishdb_core::names::title_key;
use dishdb_fetch::{build_url, HttpFetcher};

use crate::encyclopedia::Encyclopedia;
use crate::error::WikiError;
use crate::types::{category_title, MembersPage, PageSummary, RawMembersResponse, RawSummaryResponse};

const API_PATH: &str = "w/api.php";
/// Maximum members per page allowed for anonymous clients.
const MEMBERS_PAGE_SIZE: &str = "500";

/// Client for a MediaWiki-compatible encyclopedia.
#[derive(Debug, Clone)]
pub struct WikiClient {
    fetcher: HttpFetcher,
    base_url: String,
}

impl WikiClient {
    /// Creates a client for the wiki rooted at `base_url`
    /// (e.g. `https://en.wikipedia.org`).
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::InvalidBaseUrl`] if `base_url` is not an absolute
    /// http(s) URL.
    pub fn new(fetcher: HttpFetcher, base_url: &str) -> Result<Self, WikiError> {
        let trimmed = base_url.trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(WikiError::InvalidBaseUrl(base_url.to_owned()));
        }
        build_url(trimmed, API_PATH, &[])
            .map_err(|_| WikiError::InvalidBaseUrl(base_url.to_owned()))?;
        Ok(Self {
            fetcher,
            base_url: trimmed.to_owned(),
        })
    }

    async fn query(
        &self,
        params: &[(&str, &str)],
        context: &str,
    ) -> Result<serde_json::Value, WikiError> {
        let url = build_url(&self.base_url, API_PATH, params)?;
        let body = self.fetcher.get_json(&url).await?;
        check_api_error(&body)?;
        tracing::debug!(context, "encyclopedia query ok");
        Ok(body)
    }
}

impl Encyclopedia for WikiClient {
    async fn category_members(
        &self,
        category: &str,
        cursor: Option<&str>,
    ) -> Result<MembersPage, WikiError> {
        let cmtitle = category_title(category);
        let mut params = vec![
            ("action", "query"),
            ("list", "categorymembers"),
            ("cmtitle", cmtitle.as_str()),
            ("cmlimit", MEMBERS_PAGE_SIZE),
            ("cmtype", "page|subcat"),
            ("format", "json"),
            ("formatversion", "2"),
        ];
        if let Some(c) = cursor {
            params.push(("cmcontinue", c));
        }

        let context = format!("categorymembers({cmtitle})");
        let body = self.query(&params, &context).await?;
        let raw: RawMembersResponse =
            serde_json::from_value(body).map_err(|e| WikiError::Deserialize {
                context,
                source: e,
            })?;
        Ok(MembersPage::from(raw))
    }

    async fn page_summary(&self, title: &str) -> Result<Option<PageSummary>, WikiError> {
        let params = [
            ("action", "query"),
            ("prop", "extracts|pageimages|categories|info"),
            ("exintro", "1"),
            ("explaintext", "1"),
            ("piprop", "thumbnail"),
            ("pithumbsize", "400"),
            ("inprop", "url"),
            ("clshow", "!hidden"),
            ("cllimit", "50"),
            ("redirects", "1"),
            ("titles", title),
            ("format", "json"),
            ("formatversion", "2"),
        ];

        let context = format!("summary({title})");
        let body = self.query(&params, &context).await?;
        let raw: RawSummaryResponse =
            serde_json::from_value(body).map_err(|e| WikiError::Deserialize {
                context,
                source: e,
            })?;

        Ok(raw
            .query
            .and_then(|q| q.pages.into_iter().next())
            .and_then(crate::types::RawPage::into_summary))
    }

    fn article_url(&self, title: &str) -> String {
        format!("{}/wiki/{}", self.base_url, title_key(title))
    }
}

/// Maps an `{"error": {"code", "info"}}` envelope to [`WikiError::Api`].
fn check_api_error(body: &serde_json::Value) -> Result<(), WikiError> {
    if let Some(err) = body.get("error") {
        let field = |name: &str| {
            err.get(name)
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown")
                .to_owned()
        };
        return Err(WikiError::Api {
            code: field("code"),
            info: field("info"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use dishdb_fetch::RetryPolicy;

    use super::*;

    fn test_client(base_url: &str) -> WikiClient {
        let fetcher = HttpFetcher::new(5, "dishdb-test", RetryPolicy::none())
            .expect("fetcher construction should not fail");
        WikiClient::new(fetcher, base_url).expect("client construction should not fail")
    }

    #[test]
    fn article_url_uses_underscore_title() {
        let client = test_client("https://en.wikipedia.org/");
        assert_eq!(
            client.article_url("Egusi soup"),
            "https://en.wikipedia.org/wiki/Egusi_soup"
        );
    }

    #[test]
    fn rejects_non_http_base_url() {
        let fetcher = HttpFetcher::new(5, "dishdb-test", RetryPolicy::none()).unwrap();
        let err = WikiClient::new(fetcher, "ftp://wiki.example").unwrap_err();
        assert!(matches!(err, WikiError::InvalidBaseUrl(_)));
    }

    #[test]
    fn check_api_error_reads_envelope() {
        let body = serde_json::json!({"error": {"code": "ratelimited", "info": "slow down"}});
        let err = check_api_error(&body).unwrap_err();
        assert!(matches!(err, WikiError::Api { ref code, .. } if code == "ratelimited"));
        assert_eq!(err.kind(), dishdb_core::ErrorKind::RateLimited);
        assert!(check_api_error(&serde_json::json!({"query": {}})).is_ok());
    }
}
