use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::retry::{retry_with_backoff, RetryPolicy};

/// GET-only JSON client shared by all provider clients.
///
/// Maps 429 to [`FetchError::RateLimited`], 404 to [`FetchError::NotFound`],
/// 5xx to [`FetchError::ServerError`] and any other non-2xx status to
/// [`FetchError::UnexpectedStatus`]. Cloning is cheap; clones share the
/// connection pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    policy: RetryPolicy,
}

impl HttpFetcher {
    /// Creates a fetcher with the given per-call timeout, enforced
    /// `User-Agent`, and default retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        policy: RetryPolicy,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, policy })
    }

    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Fetches `url` as JSON, retrying up to `max_retries` times on
    /// rate-limit and server errors with a delay starting at `base_delay`
    /// and doubling each attempt.
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidUrl`] if `url` does not parse.
    /// - [`FetchError::RateLimited`] / [`FetchError::ServerError`] once retries are exhausted.
    /// - [`FetchError::NotFound`], [`FetchError::UnexpectedStatus`],
    ///   [`FetchError::Deserialize`] immediately, without retrying.
    pub async fn fetch_json(
        &self,
        url: &str,
        max_retries: u32,
        base_delay: Duration,
    ) -> Result<serde_json::Value, FetchError> {
        let url = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        let policy = RetryPolicy {
            max_retries,
            base_delay,
            ..self.policy
        };
        self.get_json_with(&url, policy).await
    }

    /// Fetches `url` as JSON using the fetcher's default retry policy.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_json`].
    pub async fn get_json(&self, url: &Url) -> Result<serde_json::Value, FetchError> {
        self.get_json_with(url, self.policy).await
    }

    /// Fetches `url` as JSON using an explicit retry policy.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_json`].
    pub async fn get_json_with(
        &self,
        url: &Url,
        policy: RetryPolicy,
    ) -> Result<serde_json::Value, FetchError> {
        retry_with_backoff(policy, || self.get_json_once(url)).await
    }

    /// Fetches and deserializes `url` into `T` with the given policy.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_json`]; shape mismatches yield
    /// [`FetchError::Deserialize`] tagged with `context`.
    pub async fn get_typed<T: DeserializeOwned>(
        &self,
        url: &Url,
        policy: RetryPolicy,
        context: &str,
    ) -> Result<T, FetchError> {
        let body = self.get_json_with(url, policy).await?;
        serde_json::from_value(body).map_err(|e| FetchError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    async fn get_json_once(&self, url: &Url) -> Result<serde_json::Value, FetchError> {
        tracing::debug!(url = %redact_query(url), "GET");
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(FetchError::RateLimited {
                url: redact_query(url),
                retry_after_secs,
            });
        }

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                url: redact_query(url),
            });
        }

        if status.is_server_error() {
            return Err(FetchError::ServerError {
                status: status.as_u16(),
                url: redact_query(url),
            });
        }

        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: redact_query(url),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Deserialize {
            context: redact_query(url),
            source: e,
        })
    }
}

/// Joins `path` onto `base` and appends query parameters, percent-encoded.
///
/// # Errors
///
/// Returns [`FetchError::InvalidUrl`] if `base` is not a valid URL.
pub fn build_url(base: &str, path: &str, params: &[(&str, &str)]) -> Result<Url, FetchError> {
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    let mut url = Url::parse(&joined).map_err(|e| FetchError::InvalidUrl {
        url: joined.clone(),
        reason: e.to_string(),
    })?;
    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in params {
            pairs.append_pair(k, v);
        }
    }
    Ok(url)
}

/// Renders a URL for logs and errors with `api_key`-style parameters masked.
#[must_use]
pub fn redact_query(url: &Url) -> String {
    let secret = |k: &str| matches!(k, "api_key" | "apiKey" | "key");
    if !url.query_pairs().any(|(k, _)| secret(&k)) {
        return url.to_string();
    }
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if secret(&k) {
                "[redacted]".to_owned()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
