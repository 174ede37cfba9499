//! Optional recipe search (Spoonacular `complexSearch`).
//!
//! Without an API key every search returns an empty result carrying an
//! explanatory message, and no request is made.

use dishdb_fetch::{build_url, HttpFetcher};
use serde::{Deserialize, Serialize};

use crate::error::NutritionError;

const PROVIDER: &str = "recipes";
const SEARCH_PATH: &str = "recipes/complexSearch";
const NO_KEY_MESSAGE: &str =
    "recipe search is disabled: set SPOONACULAR_API_KEY to enable it";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSearch {
    pub results: Vec<RecipeSummary>,
    pub total_results: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComplexSearchResponse {
    #[serde(default)]
    results: Vec<RecipeSummary>,
    #[serde(default)]
    total_results: u64,
}

#[derive(Clone)]
pub struct RecipeClient {
    fetcher: HttpFetcher,
    base_url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for RecipeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .finish_non_exhaustive()
    }
}

impl RecipeClient {
    /// # Errors
    ///
    /// Returns [`NutritionError::InvalidBaseUrl`] if `base_url` cannot be
    /// joined with the search path.
    pub fn new(
        fetcher: HttpFetcher,
        base_url: &str,
        api_key: Option<String>,
    ) -> Result<Self, NutritionError> {
        build_url(base_url, SEARCH_PATH, &[]).map_err(|_| NutritionError::InvalidBaseUrl {
            provider: PROVIDER,
            url: base_url.to_owned(),
        })?;
        Ok(Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Searches recipes matching `query`, at most `number` results.
    ///
    /// # Errors
    ///
    /// Returns [`NutritionError::Fetch`] on transport or status failures and
    /// [`NutritionError::Deserialize`] on an unexpected body shape.
    pub async fn search(&self, query: &str, number: u32) -> Result<RecipeSearch, NutritionError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(RecipeSearch {
                message: Some(NO_KEY_MESSAGE.to_owned()),
                ..RecipeSearch::default()
            });
        };

        let number = number.clamp(1, 100).to_string();
        let url = build_url(
            &self.base_url,
            SEARCH_PATH,
            &[("query", query), ("number", number.as_str()), ("apiKey", api_key)],
        )?;
        let response: ComplexSearchResponse = self
            .fetcher
            .get_typed(&url, self.fetcher.policy(), &format!("recipe search({query})"))
            .await?;

        let message = response
            .results
            .is_empty()
            .then(|| format!("no recipes found for \"{query}\""));
        Ok(RecipeSearch {
            results: response.results,
            total_results: response.total_results,
            message,
        })
    }
}
