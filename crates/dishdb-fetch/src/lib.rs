//! HTTP fetch layer shared by every external provider client.
//!
//! One [`HttpFetcher`] per process carries the timeout and enforced
//! `User-Agent`; [`retry_with_backoff`] retries rate-limit and server-error
//! responses with exponential back-off.

pub mod client;
pub mod error;
pub mod retry;

pub use client::{build_url, redact_query, HttpFetcher};
pub use error::FetchError;
pub use retry::{retry_with_backoff, RetryPolicy};
